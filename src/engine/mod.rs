mod batch;
mod controller;
mod interrupt;
pub mod reporter;

pub use batch::{BatchReport, SkippedSymbol, analyse_symbols, load_symbol};
pub use controller::{ChartController, ChartEvent};
pub use interrupt::Interrupt;
