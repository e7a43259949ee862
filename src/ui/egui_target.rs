use eframe::egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, HLine, Line, LineStyle, MarkerShape, PlotPoint, PlotPoints, PlotUi, Points,
    Polygon, Text,
};

use crate::ui::draw_target::{BarSpec, DrawTarget, LineSpec};

/// Draws layer output straight into an `egui_plot` plot.
pub struct EguiPlotTarget<'a, 'p> {
    plot_ui: &'a mut PlotUi<'p>,
}

impl<'a, 'p> EguiPlotTarget<'a, 'p> {
    pub fn new(plot_ui: &'a mut PlotUi<'p>) -> Self {
        Self { plot_ui }
    }
}

fn line_style(spec: &LineSpec) -> LineStyle {
    match spec.dash {
        Some(length) => LineStyle::Dashed { length },
        None => LineStyle::Solid,
    }
}

impl DrawTarget for EguiPlotTarget<'_, '_> {
    fn line(&mut self, name: &str, points: Vec<[f64; 2]>, spec: LineSpec) {
        if points.is_empty() {
            return;
        }
        self.plot_ui.line(
            Line::new(name, PlotPoints::new(points))
                .color(spec.color)
                .width(spec.width)
                .style(line_style(&spec)),
        );
    }

    fn hline(&mut self, name: &str, y: f64, spec: LineSpec) {
        self.plot_ui.hline(
            HLine::new(name, y)
                .color(spec.color)
                .width(spec.width)
                .style(line_style(&spec)),
        );
    }

    fn fill_between(&mut self, name: &str, upper: Vec<[f64; 2]>, lower: Vec<[f64; 2]>, color: Color32) {
        // One quad per day: a single polygon over the whole band would be concave
        // and egui only fills convex shapes correctly
        for (u, l) in upper.windows(2).zip(lower.windows(2)) {
            let quad = vec![u[0], u[1], l[1], l[0]];
            self.plot_ui.polygon(
                Polygon::new(name, PlotPoints::new(quad))
                    .fill_color(color)
                    .stroke(Stroke::NONE),
            );
        }
    }

    fn bars(&mut self, name: &str, bars: Vec<BarSpec>) {
        let bars = bars
            .into_iter()
            .map(|b| {
                Bar::new(b.x, b.height)
                    .width(b.width)
                    .fill(b.color)
                    .stroke(Stroke::NONE)
            })
            .collect();
        self.plot_ui.bar_chart(BarChart::new(name, bars));
    }

    fn markers(&mut self, name: &str, points: Vec<[f64; 2]>, color: Color32, radius: f32) {
        self.plot_ui.points(
            Points::new(name, PlotPoints::new(points))
                .shape(MarkerShape::Cross)
                .radius(radius)
                .color(color),
        );
    }

    fn text(&mut self, at: [f64; 2], text: &str, color: Color32) {
        self.plot_ui.text(
            Text::new(
                "",
                PlotPoint::new(at[0], at[1]),
                RichText::new(text).color(color).small(),
            )
            .anchor(Align2::RIGHT_BOTTOM),
        );
    }
}
