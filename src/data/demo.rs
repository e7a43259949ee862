//! Deterministic synthetic price history for `--demo` runs.

use std::hash::{DefaultHasher, Hash, Hasher};

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::config::constants::demo::ROWS;
use crate::domain::Candle;

/// Stable per-symbol seed so every run draws the same chart.
fn symbol_seed(symbol: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    symbol.hash(&mut hasher);
    hasher.finish()
}

/// The last `count` weekdays up to and including `end`, oldest first.
fn trading_days(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut d = end;
    while days.len() < count {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(d);
        }
        match d.checked_sub_days(Days::new(1)) {
            Some(prev) => d = prev,
            None => break,
        }
    }
    days.reverse();
    days
}

/// Trend plus two cycles plus a little seeded jitter. Prices stay positive.
pub fn synthetic_candles(symbol: &str, end: NaiveDate) -> Vec<Candle> {
    let mut rng = fastrand::Rng::with_seed(symbol_seed(symbol));
    let base = 40.0 + rng.f64() * 400.0;
    let drift = rng.f64() * 0.0008 - 0.0002;
    let phase = rng.f64() * std::f64::consts::TAU;

    // +/- 1% per draw
    let mut jitter = move || rng.f64() * 0.02 - 0.01;

    let mut prev_close = base;
    trading_days(end, ROWS)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let t = i as f64;
            let cycle = 0.08 * (t / 23.0 + phase).sin() + 0.03 * (t / 5.0).sin();
            let close = (base * (1.0 + drift).powf(t) * (1.0 + cycle) * (1.0 + jitter())).max(1.0);
            let open = prev_close;
            let spread = close * (0.004 + jitter().abs());
            let high = open.max(close) + spread;
            let low = (open.min(close) - spread).max(0.5);
            let volume = 1_000_000.0 * (1.0 + 0.5 * (t / 7.0 + phase).cos().abs());
            prev_close = close;
            Candle::new(date, open, high, low, close, volume.round())
        })
        .collect()
}
