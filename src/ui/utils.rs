use eframe::egui::{Context, Visuals};

use crate::ui::ui_config::UI_CONFIG;

pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// US-dollar price. Sub-dollar prices get more decimals so penny stocks still move.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 || price == 0.0 {
        format!("${:.2}", price)
    } else {
        format!("${:.4}", price)
    }
}

pub fn format_signed_pct(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// Compact volume label: 1.2M, 850K.
pub fn format_volume(volume: f64) -> String {
    let abs = volume.abs();
    if abs >= 1e9 {
        format!("{:.1}B", volume / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else if abs >= 1e3 {
        format!("{:.0}K", volume / 1e3)
    } else {
        format!("{:.0}", volume)
    }
}
