// Top Level Constants

/// Months of daily history requested per symbol. Long enough that MA200 is fully
/// warmed up before the 6 month display window begins.
pub const LOOKBACK_MONTHS: u32 = 15;

/// Symbols with fewer rows than this are rejected before any computation.
pub const MIN_HISTORY_ROWS: usize = 50;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

pub mod indicators {
    pub const MA_WINDOWS: [usize; 5] = [10, 20, 50, 60, 200];

    pub const BOLLINGER_WINDOW: usize = 20;
    pub const BOLLINGER_K: f64 = 2.0;
}

pub mod fibonacci {
    pub const LEVELS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];
    pub const GOLDEN_RATIO_LEVEL: f64 = 0.618;

    /// Drags spanning less than this (in price units) never finalize.
    pub const MIN_RANGE: f64 = 0.01;
}

pub mod trend {
    // Thresholds on latest close / MA20
    pub const STRONG_ABOVE: f64 = 1.02;
    pub const NEUTRAL_BULLISH_ABOVE: f64 = 1.00;
    pub const NEUTRAL_BEARISH_ABOVE: f64 = 0.98;
}

pub mod yahoo {
    pub const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
    pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stock-tracker/0.1";
}

pub mod demo {
    pub const SYMBOLS: &[&str] = &["AAPL", "MSFT", "TSLA"];
    pub const ROWS: usize = 320;
}
