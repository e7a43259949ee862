//! Configuration module for the stock tracker.

mod debug;

// Public
pub mod constants;

// Can't be private because we don't re-export it
pub mod plot;

pub use constants::{LOOKBACK_MONTHS, MIN_HISTORY_ROWS, TRADING_DAYS_PER_YEAR};
pub use debug::DF;
