use eframe::{
    Frame,
    egui::{CentralPanel, Context, Key, SidePanel, TopBottomPanel},
};

use crate::config::plot::PLOT_CONFIG;
use crate::engine::{ChartController, ChartEvent};
use crate::ui::{
    PlotHover, UI_CONFIG, render_legend, render_stats_bar, render_toolbar, setup_custom_visuals,
    show_price_plot, show_volume_plot,
};

/// eframe shell around the chart controller. Panels collect events during the frame
/// and they are applied, in order, once every widget has run.
pub struct App {
    controller: ChartController,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, controller: ChartController) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        Self { controller }
    }

    fn handle_global_shortcuts(&self, ctx: &Context, events: &mut Vec<ChartEvent>) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(Key::Escape) {
                events.push(ChartEvent::Cancel);
            }
            if i.key_pressed(Key::ArrowRight) || i.key_pressed(Key::ArrowDown) {
                events.push(ChartEvent::CycleSymbol(1));
            }
            if i.key_pressed(Key::ArrowLeft) || i.key_pressed(Key::ArrowUp) {
                events.push(ChartEvent::CycleSymbol(-1));
            }
        });
    }

    fn dispatch(&mut self, ctx: &Context, events: Vec<ChartEvent>) {
        let mut redraw = false;
        for event in events {
            redraw |= self.controller.handle(event);
        }
        if redraw {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let mut events = Vec::new();
        self.handle_global_shortcuts(ctx, &mut events);

        TopBottomPanel::top("top_toolbar")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| render_toolbar(ui, &self.controller, &mut events));

        TopBottomPanel::bottom("stats_bar")
            .frame(UI_CONFIG.bottom_panel_frame())
            .show(ctx, |ui| {
                if let (Some(chart), Some(view)) =
                    (self.controller.active_chart(), self.controller.active_view())
                {
                    if let Some(summary) = chart.summary(view.time_window()) {
                        render_stats_bar(ui, chart.symbol(), view.time_window(), &summary);
                    }
                }
            });

        SidePanel::right("legend_panel")
            .frame(UI_CONFIG.side_panel_frame())
            .exact_width(UI_CONFIG.legend_width)
            .resizable(false)
            .show(ctx, |ui| {
                if let Some(view) = self.controller.active_view() {
                    render_legend(ui, view, &mut events);
                }
            });

        let mut hover = None;
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                let spacing = ui.spacing().item_spacing.y;
                let price_height =
                    (ui.available_height() - PLOT_CONFIG.volume_panel_height - spacing).max(120.0);
                hover = show_price_plot(ui, &self.controller, price_height);
                show_volume_plot(ui, &self.controller);
            });

        let (moved, clicked) = ctx.input(|i| (i.pointer.is_moving(), i.pointer.primary_clicked()));
        push_pointer_events(&mut events, moved, clicked, hover);

        self.dispatch(ctx, events);
    }
}

/// Generic pointer events go after every widget event of the frame.
/// A tool activation with no pointer click behind it (Space or Enter on the
/// focused button) is followed by an outside click, so the activation click
/// is always consumed within its own frame.
fn push_pointer_events(events: &mut Vec<ChartEvent>, moved: bool, clicked: bool, hover: PlotHover) {
    if moved {
        events.push(ChartEvent::PointerMove(hover));
    }
    if clicked {
        events.push(ChartEvent::PointerClick(hover));
    } else if events.contains(&ChartEvent::ActivateFibonacci) {
        events.push(ChartEvent::PointerClick(None));
    }
}
