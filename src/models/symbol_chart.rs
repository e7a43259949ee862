use std::ops::Range;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::analysis::{IndicatorEngine, IndicatorSet, PriceSummary};
use crate::error::TrackError;
use crate::models::{PriceSeries, TimeWindow};

/// One validated symbol: its full history plus the indicators computed over all of it.
#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub series: PriceSeries,
    pub indicators: IndicatorSet,
    /// Shared with the plot axis formatters, which need an owned handle every frame.
    axis_dates: Arc<[NaiveDate]>,
}

impl SymbolAnalysis {
    /// Validates the history and computes indicators over every fetched row.
    pub fn build(engine: &IndicatorEngine, series: PriceSeries) -> Result<Self, TrackError> {
        engine.check_history(&series)?;
        let indicators = engine.compute(&series);
        let axis_dates = Arc::from(series.dates.as_slice());
        Ok(Self {
            series,
            indicators,
            axis_dates,
        })
    }

    pub fn axis_dates(&self) -> Arc<[NaiveDate]> {
        Arc::clone(&self.axis_dates)
    }

    pub fn symbol(&self) -> &str {
        &self.series.symbol
    }

    /// Rows shown for `window`, as indices into the full series.
    pub fn display_range(&self, window: TimeWindow) -> Range<usize> {
        self.series.tail_range(window.trading_days())
    }

    pub fn summary(&self, window: TimeWindow) -> Option<PriceSummary> {
        PriceSummary::from_window(&self.series, &self.indicators, self.display_range(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::IndicatorKey;
    use crate::domain::Candle;
    use chrono::{Days, NaiveDate};

    fn rising(n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let candles = (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                Candle::new(start + Days::new(i as u64), c, c + 1.0, c - 1.0, c, 5_000.0)
            })
            .collect();
        PriceSeries::from_candles("AAPL", candles)
    }

    #[test]
    fn window_switch_only_reslices() {
        let analysis = SymbolAnalysis::build(&IndicatorEngine::default(), rising(300)).unwrap();
        assert_eq!(analysis.display_range(TimeWindow::SixMonths), 170..300);
        assert_eq!(analysis.display_range(TimeWindow::OneMonth), 278..300);
        assert_eq!(analysis.indicators.len(), 300);

        let month = analysis.summary(TimeWindow::OneMonth).unwrap();
        let half_year = analysis.summary(TimeWindow::SixMonths).unwrap();
        assert_eq!(month.latest_price, half_year.latest_price);
        assert!(month.return_pct < half_year.return_pct);
        // MA200 is defined in both windows thanks to the full-history computation
        assert_eq!(
            analysis
                .indicators
                .latest(IndicatorKey::MovingAverage(200))
                .is_some(),
            half_year.moving_averages.iter().any(|m| m.window == 200)
        );
    }

    #[test]
    fn axis_dates_are_shared_not_copied() {
        let analysis = SymbolAnalysis::build(&IndicatorEngine::default(), rising(80)).unwrap();
        let first = analysis.axis_dates();
        let second = analysis.axis_dates();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&first[..], analysis.series.dates.as_slice());
    }

    #[test]
    fn short_history_is_rejected() {
        let err = SymbolAnalysis::build(&IndicatorEngine::default(), rising(20)).unwrap_err();
        assert!(matches!(err, TrackError::InsufficientHistory { rows: 20, .. }));
    }

    #[test]
    fn summary_on_short_series_uses_what_exists() {
        let analysis = SymbolAnalysis::build(&IndicatorEngine::default(), rising(60)).unwrap();
        assert_eq!(analysis.display_range(TimeWindow::SixMonths), 0..60);
        let s = analysis.summary(TimeWindow::SixMonths).unwrap();
        assert_eq!(s.max_drawdown_pct, 0.0);
        assert!(s.moving_averages.iter().all(|m| m.window <= 60));
    }
}
