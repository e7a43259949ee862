use eframe::egui::{Color32, RichText, Ui};
use strum::IntoEnumIterator;

use crate::analysis::PriceSummary;
use crate::config::plot::PLOT_CONFIG;
use crate::engine::{ChartController, ChartEvent};
use crate::models::{Artifact, FibPhase, TimeWindow, ViewState};
use crate::ui::ui_config::UI_CONFIG;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_price, format_signed_pct};

/// Colour swatch shown next to each legend entry.
pub fn artifact_color(artifact: Artifact) -> Color32 {
    match artifact {
        Artifact::Ma10 => PLOT_CONFIG.ma_colors[0],
        Artifact::Ma20 => PLOT_CONFIG.ma_colors[1],
        Artifact::Ma50 => PLOT_CONFIG.ma_colors[2],
        Artifact::Ma60 => PLOT_CONFIG.ma_colors[3],
        Artifact::Ma200 => PLOT_CONFIG.ma_colors[4],
        Artifact::BollingerUpper | Artifact::BollingerLower | Artifact::BollingerFill => {
            PLOT_CONFIG.bollinger_edge_color
        }
        Artifact::BollingerMiddle => PLOT_CONFIG.bollinger_middle_color,
    }
}

/// Symbol selector, time window buttons and the Fibonacci tool button.
pub fn render_toolbar(ui: &mut Ui, controller: &ChartController, events: &mut Vec<ChartEvent>) {
    let Some(view) = controller.active_view() else {
        ui.label(UI_TEXT.no_data.as_str());
        return;
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new(&UI_TEXT.label_symbol).color(UI_CONFIG.colors.heading));
        for (i, symbol) in controller.symbols().enumerate() {
            let selected = i == controller.active_index();
            if ui
                .selectable_label(selected, RichText::new(symbol).strong())
                .on_hover_text(UI_TEXT.hover_cycle_symbols.as_str())
                .clicked()
            {
                events.push(ChartEvent::SelectSymbol(i));
            }
        }

        ui.separator();
        ui.label(RichText::new(&UI_TEXT.label_window).color(UI_CONFIG.colors.heading));
        for window in TimeWindow::iter() {
            if ui
                .selectable_label(view.time_window() == window, window.to_string())
                .clicked()
            {
                events.push(ChartEvent::SelectTimeWindow(window));
            }
        }

        ui.separator();
        let fib = view.fibonacci();
        if ui
            .selectable_label(fib.is_drawing(), UI_TEXT.button_fibonacci.as_str())
            .on_hover_text(UI_TEXT.hover_fibonacci.as_str())
            .clicked()
        {
            events.push(ChartEvent::ActivateFibonacci);
        }

        let hint = match fib.phase() {
            FibPhase::Inactive => None,
            FibPhase::AwaitingFirstPoint => Some(&UI_TEXT.fib_hint_first),
            FibPhase::AwaitingSecondPoint { .. } => Some(&UI_TEXT.fib_hint_second),
            FibPhase::Finalized(_) => Some(&UI_TEXT.fib_hint_done),
        };
        if let Some(hint) = hint {
            ui.label(RichText::new(hint).italics().color(UI_CONFIG.colors.hint));
        }
    });
}

/// Clickable legend. Each Bollinger artifact gets its own row but they share one flag.
pub fn render_legend(ui: &mut Ui, view: &ViewState, events: &mut Vec<ChartEvent>) {
    ui.heading(RichText::new(&UI_TEXT.legend_heading).color(UI_CONFIG.colors.heading));
    ui.separator();

    for artifact in Artifact::iter() {
        let visible = view.artifact_visible(artifact);
        let swatch = if visible {
            artifact_color(artifact)
        } else {
            artifact_color(artifact).gamma_multiply(0.3)
        };
        ui.horizontal(|ui| {
            ui.label(RichText::new("■").color(swatch));
            let text = if visible {
                RichText::new(artifact.to_string()).strong()
            } else {
                RichText::new(artifact.to_string()).weak()
            };
            if ui
                .selectable_label(visible, text)
                .on_hover_text(UI_TEXT.hover_legend.as_str())
                .clicked()
            {
                events.push(ChartEvent::LegendPick(artifact));
            }
        });
    }
}

fn signed_color(v: f64) -> Color32 {
    if v >= 0.0 {
        UI_CONFIG.colors.positive
    } else {
        UI_CONFIG.colors.negative
    }
}

/// One-line summary of the active window.
pub fn render_stats_bar(ui: &mut Ui, symbol: &str, window: TimeWindow, s: &PriceSummary) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{} {}", symbol, format_price(s.latest_price))).strong());
        ui.separator();
        ui.label(format!("{} {}", window, UI_TEXT.sb_return));
        ui.label(RichText::new(format_signed_pct(s.return_pct)).color(signed_color(s.return_pct)));
        ui.separator();
        ui.label(format!("{} {}", UI_TEXT.sb_high, format_price(s.high_price)));
        ui.label(format!("{} {}", UI_TEXT.sb_low, format_price(s.low_price)));
        ui.separator();
        if let Some(v) = s.volatility_pct {
            ui.label(format!("{} {:.1}%", UI_TEXT.sb_volatility, v));
        }
        ui.label(
            RichText::new(format!("{} {:.1}%", UI_TEXT.sb_drawdown, s.max_drawdown_pct))
                .color(signed_color(s.max_drawdown_pct)),
        );
        ui.separator();
        ui.label(format!("{}: {}", UI_TEXT.sb_trend, s.trend))
            .on_hover_text(s.trend.description());
    });
}
