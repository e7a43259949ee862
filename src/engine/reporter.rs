//! Console output for the batch pass.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analysis::{MaReading, PriceSummary};
use crate::engine::BatchReport;
use crate::models::{SymbolAnalysis, TimeWindow};
use crate::utils::date_to_string;

const RULE_WIDTH: usize = 60;

#[derive(Tabled)]
struct MaRow {
    #[tabled(rename = "MA")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Price vs MA")]
    deviation: String,
}

impl From<&MaReading> for MaRow {
    fn from(r: &MaReading) -> Self {
        Self {
            name: format!("MA{}", r.window),
            value: format!("${:.2}", r.value),
            deviation: format!("{:+.2}%", r.deviation_pct),
        }
    }
}

pub fn ma_table(readings: &[MaReading]) -> String {
    Table::new(readings.iter().map(MaRow::from))
        .with(Style::rounded())
        .to_string()
}

pub fn format_summary(symbol: &str, window: TimeWindow, s: &PriceSummary) -> String {
    let mut lines = vec![
        format!("{} Analysis Results:", symbol),
        format!("   Latest Price: ${:.2}", s.latest_price),
        format!("   {} Return: {:+.2}%", window.long_name(), s.return_pct),
        format!("   Average Price: ${:.2}", s.average_price),
        format!("   Period High: ${:.2}", s.high_price),
        format!("   Period Low: ${:.2}", s.low_price),
        format!("   Price Range: {:.1}%", s.range_pct),
    ];
    match s.volatility_pct {
        Some(v) => lines.push(format!("   Annualized Volatility: {:.1}%", v)),
        None => lines.push("   Annualized Volatility: n/a".to_string()),
    }
    lines.push(format!("   Maximum Drawdown: {:.1}%", s.max_drawdown_pct));
    lines.push(format!(
        "   Technical Trend: {} ({})",
        s.trend,
        s.trend.description()
    ));
    if !s.moving_averages.is_empty() {
        lines.push(ma_table(&s.moving_averages));
    }
    lines.join("\n")
}

/// Everything printed after the batch, one block per symbol.
pub fn format_report(report: &BatchReport, window: TimeWindow) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = Vec::new();

    for analysis in &report.loaded {
        out.push(analysis_block(analysis, window));
        out.push(rule.clone());
    }
    for skipped in &report.skipped {
        out.push(format!("{} skipped: {}", skipped.symbol, skipped.error));
    }
    if report.interrupted() {
        out.push(format!("Interrupted before: {}", report.not_attempted.join(", ")));
    }
    out.push(format!(
        "Analysis completed! Loaded {} of {} stocks",
        report.loaded.len(),
        report.requested()
    ));
    out.join("\n")
}

fn analysis_block(analysis: &SymbolAnalysis, window: TimeWindow) -> String {
    let Some(summary) = analysis.summary(window) else {
        return format!("{}: no rows in the {} window", analysis.symbol(), window);
    };
    let range = analysis.display_range(window);
    let period = match (
        analysis.series.date_at(range.start),
        analysis.series.date_at(range.end.saturating_sub(1)),
    ) {
        (Some(first), Some(last)) => format!(
            "   Period: {} to {} ({} trading days)",
            date_to_string(first),
            date_to_string(last),
            range.len()
        ),
        _ => String::new(),
    };
    format!("{}\n{}", format_summary(analysis.symbol(), window, &summary), period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Trend;

    fn summary() -> PriceSummary {
        PriceSummary {
            latest_price: 210.5,
            return_pct: 12.345,
            average_price: 190.0,
            high_price: 215.0,
            low_price: 170.0,
            range_pct: 26.47,
            volatility_pct: Some(24.0),
            max_drawdown_pct: -8.25,
            moving_averages: vec![MaReading {
                window: 20,
                value: 200.0,
                deviation_pct: 5.25,
            }],
            trend: Trend::Strong,
        }
    }

    #[test]
    fn summary_lines() {
        let text = format_summary("AAPL", TimeWindow::SixMonths, &summary());
        assert!(text.starts_with("AAPL Analysis Results:"));
        assert!(text.contains("6-Month Return: +12.35%"));
        assert!(text.contains("Maximum Drawdown: -8.2%") || text.contains("Maximum Drawdown: -8.3%"));
        assert!(text.contains("Technical Trend: Strong (Price well above 20-day MA)"));
        assert!(text.contains("MA20"));
        assert!(text.contains("+5.25%"));
    }

    #[test]
    fn table_has_header_and_row() {
        let table = ma_table(&summary().moving_averages);
        assert!(table.contains("Price vs MA"));
        assert!(table.contains("$200.00"));
    }
}
