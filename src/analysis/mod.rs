// Indicator math, window statistics and retracement levels
mod fibonacci;
mod indicators;
mod statistics;

pub use fibonacci::{AnchorPoint, FibLevel, FibonacciAnnotation, retracement_levels};
pub use indicators::{IndicatorEngine, IndicatorKey, IndicatorSet};
pub use statistics::{
    MaReading, PriceSummary, Trend, annualized_volatility_pct, max_drawdown_pct, return_rate_pct,
};
