use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::data::demo;
use crate::domain::Candle;
use crate::utils::months_before;

/// Abstract interface for fetching daily price history.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Daily candles covering the last `months` calendar months.
    /// An unknown symbol yields an empty vec rather than an error.
    async fn fetch_history(&self, symbol: &str, months: u32) -> Result<Vec<Candle>>;

    fn name(&self) -> &'static str;
}

/// Preloaded candles keyed by symbol. Serves `--demo` runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    series: HashMap<String, Vec<Candle>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.series.insert(symbol.to_uppercase(), candles);
        self
    }

    /// Synthetic history for each symbol, ending today.
    pub fn demo(symbols: &[String]) -> Self {
        let today = crate::utils::local_today();
        symbols.iter().fold(Self::new(), |provider, symbol| {
            let candles = demo::synthetic_candles(symbol, today);
            provider.with_series(symbol, candles)
        })
    }
}

#[async_trait]
impl PriceSource for MemoryProvider {
    async fn fetch_history(&self, symbol: &str, months: u32) -> Result<Vec<Candle>> {
        let Some(candles) = self.series.get(symbol) else {
            return Ok(Vec::new());
        };
        // Lookback is measured from the newest stored row so fixtures never age out
        let Some(newest) = candles.iter().map(|c| c.date).max() else {
            return Ok(Vec::new());
        };
        let start = months_before(newest, months);
        Ok(candles.iter().filter(|c| c.date >= start).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn daily(n: u64) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        (0..n)
            .map(|i| Candle::new(start + Days::new(i), 10.0, 10.0, 10.0, 10.0, 1.0))
            .collect()
    }

    #[tokio::test]
    async fn unknown_symbol_is_empty() {
        let provider = MemoryProvider::new().with_series("aapl", daily(10));
        assert!(provider.fetch_history("ZZZZ", 15).await.unwrap().is_empty());
        assert_eq!(provider.fetch_history("AAPL", 15).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn lookback_trims_old_rows() {
        // 600 calendar days, of which 15 months is roughly 457
        let provider = MemoryProvider::new().with_series("MSFT", daily(600));
        let rows = provider.fetch_history("MSFT", 15).await.unwrap();
        assert!(rows.len() < 600 && rows.len() > 450);
        assert_eq!(rows.last().unwrap().date, daily(600).last().unwrap().date);
    }
}
