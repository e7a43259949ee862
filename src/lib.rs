#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod ui;
pub mod utils;

pub use app::App;
pub use engine::{ChartController, ChartEvent};
pub use error::TrackError;
pub use models::TimeWindow;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Comma separated tickers, e.g. "AAPL,MSFT,TSLA". Prompted for when absent.
    #[arg(long)]
    pub symbols: Option<String>,

    /// Use deterministic synthetic prices instead of Yahoo Finance
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Print the console report and exit without opening the chart window
    #[arg(long, default_value_t = false)]
    pub no_gui: bool,

    /// Initial chart window
    #[arg(long, value_enum, default_value_t = TimeWindow::SixMonths)]
    pub window: TimeWindow,
}

/// Builds the GUI app around the symbols loaded by the batch.
pub fn run_app(cc: &eframe::CreationContext<'_>, controller: ChartController) -> App {
    App::new(cc, controller)
}
