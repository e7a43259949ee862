use std::sync::Arc;

use eframe::egui::Ui;
use egui_plot::{AxisHints, HPlacement, Plot};

use crate::analysis::AnchorPoint;
use crate::config::plot::PLOT_CONFIG;
use crate::engine::ChartController;
use crate::ui::egui_target::EguiPlotTarget;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_price, format_volume};
use crate::utils::date_to_axis_label;

/// Where the pointer sits over the price plot, in plot coordinates.
/// `None` when it is anywhere else, which the Fibonacci tool treats as "outside".
pub type PlotHover = Option<AnchorPoint>;

fn x_axis(controller: &ChartController) -> AxisHints<'static> {
    let dates = controller
        .active_chart()
        .map(|c| c.axis_dates())
        .unwrap_or_else(|| Arc::from(Vec::new()));
    AxisHints::new_x().formatter(move |mark, _range| {
        let idx = mark.value.round();
        if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
            return String::new();
        }
        dates
            .get(idx as usize)
            .map(|d| date_to_axis_label(*d))
            .unwrap_or_default()
    })
}

fn padded(low: f64, high: f64, pad_pct: f64) -> (f64, f64) {
    let pad = ((high - low) * pad_pct).max(high.abs() * 1e-3);
    (low - pad, high + pad)
}

/// Price plot. Returns the pointer position while it hovers the plot area.
pub fn show_price_plot(ui: &mut Ui, controller: &ChartController, height: f32) -> PlotHover {
    let Some(range) = controller.display_range() else {
        return None;
    };
    let symbol = controller.active_symbol().unwrap_or_default().to_string();
    let (x_min, x_max) = (range.start as f64 - 0.5, range.end as f64 - 0.5);
    let (y_min, y_max) = controller
        .price_bounds()
        .map(|(lo, hi)| padded(lo, hi, PLOT_CONFIG.plot_y_padding_pct))
        .unwrap_or((0.0, 1.0));

    let plot = Plot::new("price_plot")
        .height(height)
        .custom_x_axes(vec![x_axis(controller)])
        .custom_y_axes(vec![
            AxisHints::new_y()
                .label(format!("{}  {}", symbol, UI_TEXT.plot_y_axis))
                .formatter(|mark, _range| format_price(mark.value))
                .placement(HPlacement::Right),
        ])
        .label_formatter(|_, p| format_price(p.y))
        .allow_double_click_reset(false)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false);

    let response = plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds_x(x_min..=x_max);
        plot_ui.set_plot_bounds_y(y_min..=y_max);
        controller.render_price(&mut EguiPlotTarget::new(plot_ui));
    });

    if !response.response.hovered() {
        return None;
    }
    let pos = ui.ctx().pointer_latest_pos()?;
    let value = response.transform.value_from_position(pos);
    Some(AnchorPoint::new(value.x, value.y))
}

/// Volume bars on the same x axis as the price plot.
pub fn show_volume_plot(ui: &mut Ui, controller: &ChartController) {
    let Some(range) = controller.display_range() else {
        return;
    };
    let max_volume = controller.max_volume().unwrap_or(1.0).max(1.0);

    Plot::new("volume_plot")
        .height(PLOT_CONFIG.volume_panel_height)
        .custom_x_axes(vec![x_axis(controller)])
        .custom_y_axes(vec![
            AxisHints::new_y()
                .label(UI_TEXT.plot_volume_axis.as_str())
                .formatter(|mark, _range| format_volume(mark.value))
                .placement(HPlacement::Right),
        ])
        .label_formatter(|_, p| format_volume(p.y))
        .allow_double_click_reset(false)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(range.start as f64 - 0.5..=range.end as f64 - 0.5);
            plot_ui.set_plot_bounds_y(0.0..=max_volume * 1.1);
            controller.render_volume(&mut EguiPlotTarget::new(plot_ui));
        });
}
