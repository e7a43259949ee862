mod draw_target;
mod egui_target;
mod plot_layers;
mod ui_config;
mod ui_panels;
mod ui_plot_view;
mod ui_text;
mod utils;

pub use draw_target::{BarSpec, DrawOp, DrawTarget, LineSpec, RecordingTarget};
pub use egui_target::EguiPlotTarget;
pub use plot_layers::{LayerContext, PlotLayer, price_layers, volume_layers};

pub(crate) use ui_config::UI_CONFIG;
pub(crate) use ui_panels::{render_legend, render_stats_bar, render_toolbar};
pub(crate) use ui_plot_view::{PlotHover, show_price_plot, show_volume_plot};
pub(crate) use utils::setup_custom_visuals;
