//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- PRICE ---
    pub price_line_color: Color32,
    pub price_line_width: f32,

    // --- MOVING AVERAGES ---
    /// One colour per entry of `constants::indicators::MA_WINDOWS` (same order)
    pub ma_colors: [Color32; 5],
    pub ma_line_width: f32,
    pub ma_dash_length: f32,

    // --- BOLLINGER BANDS ---
    pub bollinger_edge_color: Color32,
    pub bollinger_middle_color: Color32,
    pub bollinger_line_width: f32,
    /// Opacity of the shaded region between upper and lower band
    pub bollinger_fill_opacity_pct: f32,

    // --- FIBONACCI ---
    pub fib_level_color: Color32,
    pub fib_golden_color: Color32,
    pub fib_level_width: f32,
    pub fib_golden_width: f32,
    pub fib_preview_opacity_pct: f32,
    pub fib_crosshair_color: Color32,
    pub fib_crosshair_radius: f32,

    // --- LATEST PRICE ANNOTATION ---
    pub latest_price_color: Color32,
    pub latest_price_width: f32,

    // --- VOLUME PANEL ---
    pub volume_up_color: Color32,
    pub volume_down_color: Color32,
    pub volume_bar_width_pct: f64, // 0.0 to 1.0 (relative to one trading day)
    pub volume_panel_height: f32,

    pub plot_y_padding_pct: f64, // Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    price_line_color: Color32::from_rgb(46, 134, 171), // #2E86AB
    price_line_width: 2.5,

    ma_colors: [
        Color32::from_rgb(255, 165, 0),  // MA10  Orange
        Color32::from_rgb(242, 66, 54),  // MA20  #F24236
        Color32::from_rgb(46, 196, 182), // MA50  Teal
        Color32::from_rgb(155, 93, 229), // MA60  Purple
        Color32::from_rgb(162, 59, 114), // MA200 #A23B72
    ],
    ma_line_width: 1.8,
    ma_dash_length: 8.0,

    bollinger_edge_color: Color32::from_rgb(128, 128, 128),
    bollinger_middle_color: Color32::from_rgb(190, 190, 190),
    bollinger_line_width: 1.2,
    bollinger_fill_opacity_pct: 0.12,

    fib_level_color: Color32::from_rgb(120, 170, 240),
    fib_golden_color: Color32::from_rgb(255, 215, 0), // Gold for the 61.8% level
    fib_level_width: 1.2,
    fib_golden_width: 2.5,
    fib_preview_opacity_pct: 0.45,
    fib_crosshair_color: Color32::from_rgb(255, 80, 80),
    fib_crosshair_radius: 8.0,

    latest_price_color: Color32::from_rgb(173, 216, 230), // Light Blue
    latest_price_width: 1.0,

    volume_up_color: Color32::from_rgb(38, 166, 154), // TradingView Green
    volume_down_color: Color32::from_rgb(239, 83, 80), // TradingView Red
    volume_bar_width_pct: 0.8,
    volume_panel_height: 140.0,

    plot_y_padding_pct: 0.04,
};
