//! Window statistics for the per-symbol summary.

use std::ops::Range;

use serde::Serialize;
use strum_macros::Display;

use crate::analysis::{IndicatorKey, IndicatorSet};
use crate::config::TRADING_DAYS_PER_YEAR;
use crate::config::constants::trend;
use crate::models::PriceSeries;
use crate::utils::maths_utils;

/// (last - first) / first, in percent.
pub fn return_rate_pct(closes: &[f64]) -> Option<f64> {
    let first = *closes.first()?;
    let last = *closes.last()?;
    Some((last - first) / first * 100.0)
}

/// Deepest fall from the running peak, in percent. Always <= 0.
pub fn max_drawdown_pct(closes: &[f64]) -> Option<f64> {
    let mut running_max = *closes.first()?;
    let mut worst = 0.0_f64;
    for &c in closes {
        running_max = running_max.max(c);
        worst = worst.min((c - running_max) / running_max * 100.0);
    }
    Some(worst)
}

/// Sample stdev of daily percentage change, scaled to a year and expressed in percent.
pub fn annualized_volatility_pct(closes: &[f64]) -> Option<f64> {
    let changes = maths_utils::pct_change(closes);
    maths_utils::sample_stddev(&changes).map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}

/// Position of the latest close relative to MA20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Trend {
    #[strum(to_string = "Strong")]
    Strong,
    #[strum(to_string = "Neutral-Bullish")]
    NeutralBullish,
    #[strum(to_string = "Neutral-Bearish")]
    NeutralBearish,
    #[strum(to_string = "Weak")]
    Weak,
    #[strum(to_string = "Unknown")]
    Unknown,
}

impl Trend {
    pub fn classify(price: f64, ma20: Option<f64>) -> Self {
        let Some(ma20) = ma20.filter(|m| *m > 0.0) else {
            return Self::Unknown;
        };
        let ratio = price / ma20;
        if ratio > trend::STRONG_ABOVE {
            Self::Strong
        } else if ratio > trend::NEUTRAL_BULLISH_ABOVE {
            Self::NeutralBullish
        } else if ratio > trend::NEUTRAL_BEARISH_ABOVE {
            Self::NeutralBearish
        } else {
            Self::Weak
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Strong => "Price well above 20-day MA",
            Self::NeutralBullish => "Price slightly above 20-day MA",
            Self::NeutralBearish => "Price slightly below 20-day MA",
            Self::Weak => "Price well below 20-day MA",
            Self::Unknown => "20-day MA not available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaReading {
    pub window: usize,
    pub value: f64,
    /// (price - MA) / MA, in percent
    pub deviation_pct: f64,
}

/// Everything printed (and shown in the GUI stats bar) for one symbol over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub latest_price: f64,
    pub return_pct: f64,
    pub average_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub range_pct: f64,
    pub volatility_pct: Option<f64>,
    pub max_drawdown_pct: f64,
    pub moving_averages: Vec<MaReading>,
    pub trend: Trend,
}

impl PriceSummary {
    /// Summarises the closes in `range`. Moving averages are read at the last row of
    /// the window from the set computed over the full history.
    pub fn from_window(
        series: &PriceSeries,
        indicators: &IndicatorSet,
        range: Range<usize>,
    ) -> Option<Self> {
        let closes = series.close_prices.get(range.clone())?;
        let latest_price = *closes.last()?;
        let last_idx = range.end - 1;

        let high_price = maths_utils::get_max(closes);
        let low_price = maths_utils::get_min(closes);
        let average_price = closes.iter().sum::<f64>() / closes.len() as f64;

        let moving_averages = indicators
            .keys()
            .filter_map(|key| match key {
                IndicatorKey::MovingAverage(window) => {
                    let value = indicators.value_at(key, last_idx)?;
                    Some(MaReading {
                        window,
                        value,
                        deviation_pct: (latest_price - value) / value * 100.0,
                    })
                }
                _ => None,
            })
            .collect();

        Some(Self {
            latest_price,
            return_pct: return_rate_pct(closes)?,
            average_price,
            high_price,
            low_price,
            range_pct: (high_price - low_price) / low_price * 100.0,
            volatility_pct: annualized_volatility_pct(closes),
            max_drawdown_pct: max_drawdown_pct(closes)?,
            moving_averages,
            trend: Trend::classify(
                latest_price,
                indicators.value_at(IndicatorKey::MovingAverage(20), last_idx),
            ),
        })
    }
}
