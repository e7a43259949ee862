use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::MIN_HISTORY_ROWS;
use crate::config::constants::indicators::{BOLLINGER_K, BOLLINGER_WINDOW, MA_WINDOWS};
use crate::error::TrackError;
use crate::models::PriceSeries;
use crate::utils::maths_utils;

/// Name of one computed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorKey {
    MovingAverage(usize),
    BollingerUpper,
    BollingerMiddle,
    BollingerLower,
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MovingAverage(w) => write!(f, "MA{}", w),
            Self::BollingerUpper => write!(f, "BB_upper"),
            Self::BollingerMiddle => write!(f, "BB_middle"),
            Self::BollingerLower => write!(f, "BB_lower"),
        }
    }
}

/// Indicator lines aligned index-for-index with the `PriceSeries` they came from.
/// `None` marks positions still inside an indicator's warm-up window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    len: usize,
    values: BTreeMap<IndicatorKey, Vec<Option<f64>>>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn keys(&self) -> impl Iterator<Item = IndicatorKey> + '_ {
        self.values.keys().copied()
    }

    pub fn get(&self, key: IndicatorKey) -> Option<&[Option<f64>]> {
        self.values.get(&key).map(Vec::as_slice)
    }

    /// Lookup by display name, e.g. `"MA20"` or `"BB_upper"`.
    pub fn by_name(&self, name: &str) -> Option<&[Option<f64>]> {
        self.values
            .iter()
            .find(|(k, _)| k.to_string() == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn value_at(&self, key: IndicatorKey, idx: usize) -> Option<f64> {
        self.get(key).and_then(|v| v.get(idx).copied().flatten())
    }

    pub fn latest(&self, key: IndicatorKey) -> Option<f64> {
        self.len.checked_sub(1).and_then(|i| self.value_at(key, i))
    }

    /// Borrow a display window of one line. Warm-up computed over the full history is kept.
    pub fn slice(&self, key: IndicatorKey, range: Range<usize>) -> Option<&[Option<f64>]> {
        self.get(key).and_then(|v| v.get(range))
    }

    fn insert(&mut self, key: IndicatorKey, line: Vec<Option<f64>>) {
        debug_assert_eq!(line.len(), self.len);
        self.values.insert(key, line);
    }
}

/// Pure indicator computation over a whole `PriceSeries`.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    pub ma_windows: Vec<usize>,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
    pub min_history_rows: usize,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            ma_windows: MA_WINDOWS.to_vec(),
            bollinger_window: BOLLINGER_WINDOW,
            bollinger_k: BOLLINGER_K,
            min_history_rows: MIN_HISTORY_ROWS,
        }
    }
}

impl IndicatorEngine {
    /// Rejects series that are empty or too short to be worth charting.
    pub fn check_history(&self, series: &PriceSeries) -> Result<(), TrackError> {
        if series.is_empty() {
            return Err(TrackError::EmptyResult {
                symbol: series.symbol.clone(),
            });
        }
        if series.len() < self.min_history_rows {
            return Err(TrackError::InsufficientHistory {
                symbol: series.symbol.clone(),
                rows: series.len(),
                required: self.min_history_rows,
            });
        }
        Ok(())
    }

    pub fn compute(&self, series: &PriceSeries) -> IndicatorSet {
        crate::trace_time!("Indicator compute", 2_000, {
            let closes = &series.close_prices;
            let mut set = IndicatorSet {
                len: closes.len(),
                values: BTreeMap::new(),
            };

            for &w in &self.ma_windows {
                set.insert(
                    IndicatorKey::MovingAverage(w),
                    maths_utils::rolling_mean(closes, w),
                );
            }

            let middle = maths_utils::rolling_mean(closes, self.bollinger_window);
            let sigma = maths_utils::rolling_sample_stddev(closes, self.bollinger_window);
            let k = self.bollinger_k;
            let band = |sign: f64| -> Vec<Option<f64>> {
                middle
                    .iter()
                    .zip(&sigma)
                    .map(|(m, s)| Some((*m)? + sign * k * (*s)?))
                    .collect()
            };

            set.insert(IndicatorKey::BollingerUpper, band(1.0));
            set.insert(IndicatorKey::BollingerLower, band(-1.0));
            set.insert(IndicatorKey::BollingerMiddle, middle);
            set
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;
    use chrono::{Days, NaiveDate};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(start + Days::new(i as u64), c, c, c, c, 100.0))
            .collect();
        PriceSeries::from_candles("TEST", candles)
    }

    fn wavy(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn short_series_leaves_window_undefined() {
        let set = IndicatorEngine::default().compute(&series(&wavy(150)));
        let ma200 = set.get(IndicatorKey::MovingAverage(200)).unwrap();
        assert_eq!(ma200.len(), 150);
        assert!(ma200.iter().all(Option::is_none));
    }

    #[test]
    fn sma_matches_trailing_mean() {
        let closes = wavy(260);
        let set = IndicatorEngine::default().compute(&series(&closes));

        for &w in &MA_WINDOWS {
            let line = set.get(IndicatorKey::MovingAverage(w)).unwrap();
            for (i, v) in line.iter().enumerate() {
                if i + 1 < w {
                    assert!(v.is_none(), "MA{} defined at {}", w, i);
                } else {
                    let expected = closes[i + 1 - w..=i].iter().sum::<f64>() / w as f64;
                    assert!((v.unwrap() - expected).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn bollinger_width_is_four_sigma() {
        let closes = wavy(120);
        let set = IndicatorEngine::default().compute(&series(&closes));
        let sigma = maths_utils::rolling_sample_stddev(&closes, BOLLINGER_WINDOW);

        for i in 0..closes.len() {
            let upper = set.value_at(IndicatorKey::BollingerUpper, i);
            let lower = set.value_at(IndicatorKey::BollingerLower, i);
            let middle = set.value_at(IndicatorKey::BollingerMiddle, i);
            match sigma[i] {
                None => assert!(upper.is_none() && lower.is_none() && middle.is_none()),
                Some(s) => {
                    let width = upper.unwrap() - lower.unwrap();
                    assert!((width - 2.0 * BOLLINGER_K * s).abs() < 1e-9);
                    assert_eq!(middle, set.value_at(IndicatorKey::MovingAverage(20), i));
                }
            }
        }
    }

    #[test]
    fn slicing_keeps_warm_up_from_full_history() {
        // About what a 15-month lookback returns
        let closes = wavy(330);
        let set = IndicatorEngine::default().compute(&series(&closes));
        let full = series(&closes);
        let range = full.tail_range(130);
        assert_eq!(range, 200..330);

        let sliced = set.slice(IndicatorKey::MovingAverage(200), range.clone()).unwrap();
        assert!(sliced[0].is_some());
        assert!(sliced.iter().all(Option::is_some));

        // Index equivalent to the full computation
        let ma200 = set.get(IndicatorKey::MovingAverage(200)).unwrap();
        assert_eq!(sliced, &ma200[range]);

        // Computing fresh over only the last 130 rows loses the long window
        let fresh = IndicatorEngine::default().compute(&series(&closes[200..]));
        assert!(
            fresh
                .get(IndicatorKey::MovingAverage(200))
                .unwrap()
                .iter()
                .all(Option::is_none)
        );
        let fresh_ma20 = fresh.get(IndicatorKey::MovingAverage(20)).unwrap();
        let sliced_ma20 = set.slice(IndicatorKey::MovingAverage(20), 200..330).unwrap();
        for i in 19..130 {
            assert!((fresh_ma20[i].unwrap() - sliced_ma20[i].unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn lookup_by_name() {
        let set = IndicatorEngine::default().compute(&series(&wavy(60)));
        assert!(set.by_name("MA20").is_some());
        assert!(set.by_name("BB_lower").is_some());
        assert!(set.by_name("MA7").is_none());
        assert_eq!(set.len(), 60);
    }

    #[test]
    fn history_checks() {
        let engine = IndicatorEngine::default();
        assert!(matches!(
            engine.check_history(&series(&[])),
            Err(TrackError::EmptyResult { .. })
        ));
        assert_eq!(
            engine.check_history(&series(&wavy(49))),
            Err(TrackError::InsufficientHistory {
                symbol: "TEST".into(),
                rows: 49,
                required: 50
            })
        );
        assert!(engine.check_history(&series(&wavy(50))).is_ok());
    }
}
