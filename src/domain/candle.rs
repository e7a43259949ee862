use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One trading day of price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,

    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Candle {
            date,
            open_price: open,
            high_price: high,
            low_price: low,
            close_price: close,
            volume,
        }
    }

    // A method to determine the type of candle
    pub fn get_type(&self) -> CandleType {
        if self.close_price >= self.open_price {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// A close we can compute with. Yahoo pads halted days with nulls which arrive here as NaN.
    pub(crate) fn has_usable_close(&self) -> bool {
        self.close_price.is_finite() && self.close_price > 0.0
    }
}
