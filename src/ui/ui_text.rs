use std::sync::LazyLock;

pub struct UiText {
    // --- TOOLBAR ---
    pub label_symbol: String,
    pub label_window: String,
    pub button_fibonacci: String,
    pub hover_fibonacci: String,
    pub hover_cycle_symbols: String,

    // --- LEGEND ---
    pub legend_heading: String,
    pub hover_legend: String,

    // --- PLOT LABELS ---
    pub plot_y_axis: String,
    pub plot_volume_axis: String,
    pub label_close: String,
    pub label_latest: String,
    pub label_latest_price: String,
    pub label_volume: String,
    pub label_fib_anchor: String,

    // --- FIBONACCI HINTS ---
    pub fib_hint_first: String,
    pub fib_hint_second: String,
    pub fib_hint_done: String,

    // --- STATS BAR ---
    pub sb_return: String,
    pub sb_high: String,
    pub sb_low: String,
    pub sb_volatility: String,
    pub sb_drawdown: String,
    pub sb_trend: String,

    pub no_data: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    label_symbol: "Symbol".to_string(),
    label_window: "Window".to_string(),
    button_fibonacci: "Fibonacci".to_string(),
    hover_fibonacci: "Click two points on the price chart. Esc cancels or clears.".to_string(),
    hover_cycle_symbols: "Left/Right arrows switch symbol".to_string(),

    legend_heading: "Overlays".to_string(),
    hover_legend: "Click to show or hide".to_string(),

    plot_y_axis: "Price".to_string(),
    plot_volume_axis: "Volume".to_string(),
    label_close: "Close".to_string(),
    label_latest: "Latest".to_string(),
    label_latest_price: "Latest price".to_string(),
    label_volume: "Volume".to_string(),
    label_fib_anchor: "Fib anchor".to_string(),

    fib_hint_first: "Fibonacci: click the first point".to_string(),
    fib_hint_second: "Fibonacci: click the second point".to_string(),
    fib_hint_done: "Fibonacci: Esc clears".to_string(),

    sb_return: "Return".to_string(),
    sb_high: "High".to_string(),
    sb_low: "Low".to_string(),
    sb_volatility: "Volatility".to_string(),
    sb_drawdown: "Max DD".to_string(),
    sb_trend: "Trend".to_string(),

    no_data: "No symbols loaded".to_string(),
});
