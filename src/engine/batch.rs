use crate::analysis::IndicatorEngine;
use crate::config::{DF, LOOKBACK_MONTHS};
use crate::data::PriceSource;
use crate::engine::Interrupt;
use crate::error::TrackError;
use crate::models::{PriceSeries, SymbolAnalysis};

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub error: TrackError,
}

/// Outcome of one pass over the requested symbols.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// In request order.
    pub loaded: Vec<SymbolAnalysis>,
    pub skipped: Vec<SkippedSymbol>,
    /// Symbols never attempted because the user interrupted.
    pub not_attempted: Vec<String>,
}

impl BatchReport {
    pub fn interrupted(&self) -> bool {
        !self.not_attempted.is_empty()
    }

    pub fn requested(&self) -> usize {
        self.loaded.len() + self.skipped.len() + self.not_attempted.len()
    }
}

/// Fetch, validate and compute one symbol.
pub async fn load_symbol(
    source: &dyn PriceSource,
    engine: &IndicatorEngine,
    symbol: &str,
) -> Result<SymbolAnalysis, TrackError> {
    let candles = source
        .fetch_history(symbol, LOOKBACK_MONTHS)
        .await
        .map_err(|e| TrackError::Fetch {
            symbol: symbol.to_string(),
            message: format!("{:#}", e),
        })?;

    let series = PriceSeries::from_candles(symbol, candles);
    if DF.log_fetch {
        log::info!("{}: {} usable rows from {}", symbol, series.len(), source.name());
    }
    SymbolAnalysis::build(engine, series)
}

/// Sequential pass over `symbols`. A failing symbol is logged and skipped; an
/// interrupt stops before the next symbol and keeps what already loaded.
pub async fn analyse_symbols(
    source: &dyn PriceSource,
    engine: &IndicatorEngine,
    symbols: &[String],
    interrupt: &Interrupt,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (i, symbol) in symbols.iter().enumerate() {
        if interrupt.is_requested() {
            log::warn!("{}, skipping {} remaining symbol(s)", TrackError::UserInterrupt, symbols.len() - i);
            report.not_attempted = symbols[i..].to_vec();
            break;
        }

        log::info!("Analyzing {} ({}/{})", symbol, i + 1, symbols.len());
        match load_symbol(source, engine, symbol).await {
            Ok(analysis) => report.loaded.push(analysis),
            Err(error) => {
                log::warn!("{}", error);
                report.skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    error,
                });
            }
        }
    }

    interrupt.finish_batch();
    report
}
