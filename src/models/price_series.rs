use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Candle;

/// Daily OHLCV history for one symbol, stored column-wise.
/// Dates are strictly ascending; the series is never mutated after construction.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    /// Builds a series from raw candles in any order.
    /// Rows without a usable close are dropped and a repeated date keeps its last row.
    pub fn from_candles(symbol: impl Into<String>, mut candles: Vec<Candle>) -> Self {
        candles.retain(Candle::has_usable_close);
        // Stable sort keeps arrival order inside a date, so the later row wins below
        candles.sort_by_key(|c| c.date);

        let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
        for c in candles {
            match deduped.last_mut() {
                Some(last) if last.date == c.date => *last = c,
                _ => deduped.push(c),
            }
        }

        let len = deduped.len();
        let mut series = Self {
            symbol: symbol.into(),
            dates: Vec::with_capacity(len),
            open_prices: Vec::with_capacity(len),
            high_prices: Vec::with_capacity(len),
            low_prices: Vec::with_capacity(len),
            close_prices: Vec::with_capacity(len),
            volumes: Vec::with_capacity(len),
        };

        for c in deduped {
            series.dates.push(c.date);
            series.open_prices.push(c.open_price);
            series.high_prices.push(c.high_price);
            series.low_prices.push(c.low_price);
            series.close_prices.push(c.close_price);
            series.volumes.push(c.volume);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_prices.is_empty()
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.dates[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }

    /// Index range of the last `rows` rows (the whole series if it is shorter).
    pub fn tail_range(&self, rows: usize) -> Range<usize> {
        self.len().saturating_sub(rows)..self.len()
    }

    pub fn date_at(&self, idx: usize) -> Option<NaiveDate> {
        self.dates.get(idx).copied()
    }
}
