use thiserror::Error;

/// Everything that can go wrong while loading or interacting with a symbol.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackError {
    #[error("no data found for {symbol}, please check the symbol")]
    EmptyResult { symbol: String },

    #[error("{symbol} has only {rows} rows of history, at least {required} are needed")]
    InsufficientHistory {
        symbol: String,
        rows: usize,
        required: usize,
    },

    #[error("fibonacci range {span:.4} is too small to draw")]
    DegenerateFibonacciRange { span: f64 },

    #[error("interrupted by user")]
    UserInterrupt,

    #[error("failed to fetch {symbol}: {message}")]
    Fetch { symbol: String, message: String },

    #[error("symbol {symbol} is not loaded")]
    UnknownSymbol { symbol: String },
}

