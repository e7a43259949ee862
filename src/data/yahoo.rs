use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::config::DF;
use crate::config::constants::yahoo::{CHART_URL, USER_AGENT};
use crate::data::PriceSource;
use crate::domain::Candle;
use crate::utils::{local_today, months_before};

/// Daily history from the Yahoo Finance v8 chart endpoint.
pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PriceSource for YahooProvider {
    async fn fetch_history(&self, symbol: &str, months: u32) -> Result<Vec<Candle>> {
        let today = local_today();
        let start = months_before(today, months);
        let period1 = to_unix(start);
        let period2 = to_unix(today) + 86_400;

        let url = format!("{}/{}", CHART_URL, symbol);
        if DF.log_fetch {
            log::info!("Fetching {} from {} to {}", symbol, start, today);
        }

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("requesting {}", symbol))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("reading response for {}", symbol))?;

        // Unknown tickers come back as 404 with a chart error body
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            bail!("HTTP {} for {}", status, symbol);
        }

        let candles = parse_chart(&body)?;
        if DF.log_fetch {
            log::info!("{}: {} rows", symbol, candles.len());
        }
        Ok(candles)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

fn to_unix(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Turns a chart response body into candles. Rows with any missing OHLC value are dropped.
pub(crate) fn parse_chart(body: &str) -> Result<Vec<Candle>> {
    let response: ChartResponse =
        serde_json::from_str(body).context("failed to parse yahoo chart")?;

    if let Some(error) = response.chart.error {
        if error.code == "Not Found" {
            return Ok(Vec::new());
        }
        bail!("yahoo chart API error: {} ({})", error.description, error.code);
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };
    let offset = result.meta.map(|m| m.gmtoffset).unwrap_or_default();

    let candles = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            // Exchange-local calendar day of the bar
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            let open = quote.open.get(i).copied().flatten()?;
            let high = quote.high.get(i).copied().flatten()?;
            let low = quote.low.get(i).copied().flatten()?;
            let close = quote.close.get(i).copied().flatten()?;
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);
            Some(Candle::new(date, open, high, low, close, volume))
        })
        .collect();
    Ok(candles)
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
