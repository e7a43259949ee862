mod fib_tool;
mod price_series;
mod symbol_chart;
mod view_state;

pub use fib_tool::{FibOutcome, FibPhase, FibPreview, FibonacciTool};
pub use price_series::PriceSeries;
pub use symbol_chart::SymbolAnalysis;
pub use view_state::{Artifact, Overlay, TimeWindow, ViewState, ViewStates};
