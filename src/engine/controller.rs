use std::ops::Range;

use crate::analysis::AnchorPoint;
use crate::config::DF;
use crate::error::TrackError;
use crate::models::{Artifact, FibonacciTool, SymbolAnalysis, TimeWindow, ViewState, ViewStates};
use crate::ui::{DrawTarget, LayerContext, price_layers, volume_layers};

/// User input, already translated out of the GUI toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    SelectSymbol(usize),
    /// Arrow keys: +1 next, -1 previous, wrapping.
    CycleSymbol(isize),
    SelectTimeWindow(TimeWindow),
    LegendPick(Artifact),
    ActivateFibonacci,
    /// `None` when the click landed outside the price plot.
    PointerClick(Option<AnchorPoint>),
    PointerMove(Option<AnchorPoint>),
    Cancel,
}

/// Owns every loaded symbol and its view state, and routes events to the active one.
pub struct ChartController {
    charts: Vec<SymbolAnalysis>,
    views: ViewStates,
    active: usize,
}

impl ChartController {
    pub fn new(charts: Vec<SymbolAnalysis>, window: TimeWindow) -> Self {
        let mut views = ViewStates::default();
        for chart in &charts {
            views.insert(chart.symbol(), ViewState::new(window));
        }
        Self {
            charts,
            views,
            active: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.charts.iter().map(SymbolAnalysis::symbol)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_chart(&self) -> Option<&SymbolAnalysis> {
        self.charts.get(self.active)
    }

    pub fn active_symbol(&self) -> Option<&str> {
        self.active_chart().map(SymbolAnalysis::symbol)
    }

    pub fn active_view(&self) -> Option<&ViewState> {
        let symbol = self.active_symbol()?;
        self.views.get(symbol).ok()
    }

    pub fn views(&self) -> &ViewStates {
        &self.views
    }

    /// Rows shown for the active symbol.
    pub fn display_range(&self) -> Option<Range<usize>> {
        let chart = self.active_chart()?;
        let view = self.active_view()?;
        Some(chart.display_range(view.time_window()))
    }

    /// Applies one event. Returns whether the chart needs redrawing.
    pub fn handle(&mut self, event: ChartEvent) -> bool {
        match self.try_handle(event) {
            Ok(redraw) => redraw,
            Err(e) => {
                log::warn!("{:?} dropped: {}", event, e);
                false
            }
        }
    }

    fn try_handle(&mut self, event: ChartEvent) -> Result<bool, TrackError> {
        let Some(symbol) = self.active_symbol().map(str::to_owned) else {
            return Ok(false);
        };

        let redraw = match event {
            ChartEvent::SelectSymbol(idx) => self.select(idx),
            ChartEvent::CycleSymbol(step) => {
                let len = self.charts.len() as isize;
                let next = (self.active as isize + step).rem_euclid(len) as usize;
                self.select(next)
            }
            ChartEvent::SelectTimeWindow(window) => {
                let changed = self.views.get(&symbol)?.time_window() != window;
                self.views.set_time_window(&symbol, window)?;
                if changed && DF.log_view_changes {
                    log::info!("{}: window {}", symbol, window);
                }
                changed
            }
            ChartEvent::LegendPick(artifact) => {
                let visible = self.views.toggle_overlay(&symbol, artifact.overlay())?;
                if DF.log_view_changes {
                    log::info!("{}: {} visible = {}", symbol, artifact.overlay(), visible);
                }
                true
            }
            ChartEvent::ActivateFibonacci => self.fib(&symbol)?.activate().needs_redraw(),
            ChartEvent::PointerClick(at) => self.fib(&symbol)?.on_click(at).needs_redraw(),
            ChartEvent::PointerMove(at) => self.fib(&symbol)?.on_pointer_move(at).needs_redraw(),
            ChartEvent::Cancel => self.fib(&symbol)?.cancel().needs_redraw(),
        };
        Ok(redraw)
    }

    fn fib(&mut self, symbol: &str) -> Result<&mut FibonacciTool, TrackError> {
        Ok(self.views.get_mut(symbol)?.fibonacci_mut())
    }

    fn select(&mut self, idx: usize) -> bool {
        if idx >= self.charts.len() || idx == self.active {
            return false;
        }
        self.active = idx;
        if DF.log_view_changes {
            log::info!("Showing {}", self.charts[idx].symbol());
        }
        true
    }

    fn layer_context(&self) -> Option<LayerContext<'_>> {
        let analysis = self.active_chart()?;
        let view = self.views.get(analysis.symbol()).ok()?;
        Some(LayerContext {
            analysis,
            view,
            range: analysis.display_range(view.time_window()),
        })
    }

    /// Price panel of the active symbol.
    pub fn render_price(&self, target: &mut dyn DrawTarget) {
        if let Some(ctx) = self.layer_context() {
            for layer in price_layers() {
                layer.render(target, &ctx);
            }
        }
    }

    pub fn render_volume(&self, target: &mut dyn DrawTarget) {
        if let Some(ctx) = self.layer_context() {
            for layer in volume_layers() {
                layer.render(target, &ctx);
            }
        }
    }

    /// Low and high of everything visible on the price panel, for auto-fitting the y axis.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let ctx = self.layer_context()?;
        let series = &ctx.analysis.series;
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        let mut include = |v: f64| {
            low = low.min(v);
            high = high.max(v);
        };

        for i in ctx.range.clone() {
            include(series.close_prices[i]);
        }
        for artifact in [
            Artifact::Ma10,
            Artifact::Ma20,
            Artifact::Ma50,
            Artifact::Ma60,
            Artifact::Ma200,
            Artifact::BollingerUpper,
            Artifact::BollingerLower,
        ] {
            if !ctx.view.artifact_visible(artifact) {
                continue;
            }
            let Some(key) = artifact.indicator_key() else {
                continue;
            };
            if let Some(line) = ctx.analysis.indicators.slice(key, ctx.range.clone()) {
                line.iter().flatten().for_each(|v| include(*v));
            }
        }
        if let Some(ann) = ctx.view.fibonacci().annotation() {
            include(ann.high);
            include(ann.low);
        }

        (low <= high).then_some((low, high))
    }

    pub fn max_volume(&self) -> Option<f64> {
        let ctx = self.layer_context()?;
        ctx.analysis
            .series
            .volumes
            .get(ctx.range.clone())
            .map(|v| v.iter().copied().fold(0.0, f64::max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::IndicatorEngine;
    use crate::domain::Candle;
    use crate::models::{FibPhase, Overlay, PriceSeries};
    use crate::ui::{DrawOp, RecordingTarget};
    use chrono::{Days, NaiveDate};

    fn analysis(symbol: &str, n: usize) -> SymbolAnalysis {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let candles = (0..n)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.3).sin() * 4.0 + i as f64 * 0.05;
                Candle::new(start + Days::new(i as u64), c - 0.5, c + 1.0, c - 1.0, c, 1_000.0 + i as f64)
            })
            .collect();
        SymbolAnalysis::build(&IndicatorEngine::default(), PriceSeries::from_candles(symbol, candles))
            .unwrap()
    }

    fn controller() -> ChartController {
        ChartController::new(
            vec![analysis("AAPL", 260), analysis("MSFT", 260), analysis("TSLA", 90)],
            TimeWindow::default(),
        )
    }

    fn at(x: f64, price: f64) -> Option<AnchorPoint> {
        Some(AnchorPoint::new(x, price))
    }

    #[test]
    fn symbol_switching_wraps() {
        let mut c = controller();
        assert!(!c.handle(ChartEvent::SelectSymbol(0)));
        assert!(!c.handle(ChartEvent::SelectSymbol(7)));
        assert!(c.handle(ChartEvent::CycleSymbol(-1)));
        assert_eq!(c.active_symbol(), Some("TSLA"));
        assert!(c.handle(ChartEvent::CycleSymbol(1)));
        assert_eq!(c.active_symbol(), Some("AAPL"));
        assert!(c.handle(ChartEvent::SelectSymbol(1)));
        assert_eq!(c.active_symbol(), Some("MSFT"));
    }

    #[test]
    fn window_switch_reslices_active_symbol_only() {
        let mut c = controller();
        assert_eq!(c.display_range(), Some(130..260));
        assert!(c.handle(ChartEvent::SelectTimeWindow(TimeWindow::OneMonth)));
        assert!(!c.handle(ChartEvent::SelectTimeWindow(TimeWindow::OneMonth)));
        assert_eq!(c.display_range(), Some(238..260));

        c.handle(ChartEvent::SelectSymbol(2));
        // Shorter than the window: everything is shown
        assert_eq!(c.display_range(), Some(0..90));
    }

    #[test]
    fn legend_pick_toggles_compound_overlay() {
        let mut c = controller();
        assert!(c.handle(ChartEvent::LegendPick(Artifact::BollingerLower)));
        let view = c.active_view().unwrap();
        assert!(view.is_visible(Overlay::BollingerBands));
        assert!(view.artifact_visible(Artifact::BollingerUpper));

        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        let names = target.names();
        assert_eq!(&names[..4], &["BB Band", "BB Upper", "BB Lower", "BB Middle"]);

        c.handle(ChartEvent::LegendPick(Artifact::BollingerFill));
        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        assert!(target.names().iter().all(|n| !n.starts_with("BB")));
    }

    #[test]
    fn render_stack_order_and_alignment() {
        let mut c = controller();
        c.handle(ChartEvent::LegendPick(Artifact::Ma200));
        c.handle(ChartEvent::LegendPick(Artifact::Ma10));

        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        assert_eq!(target.names(), vec!["AAPL Close", "MA10", "MA200", "Latest price"]);

        let Some(DrawOp::Line { points, .. }) = target.find("AAPL Close") else {
            panic!("price line missing");
        };
        assert_eq!(points.len(), 130);
        assert_eq!(points[0][0], 130.0);

        // MA200 inside the window starts after its warm-up at index 199
        let Some(DrawOp::Line { points, .. }) = target.find("MA200") else {
            panic!("MA200 missing");
        };
        assert_eq!(points[0][0], 199.0);
        assert_eq!(points.len(), 61);

        let mut volume = RecordingTarget::new();
        c.render_volume(&mut volume);
        let Some(DrawOp::Bars { bars, .. }) = volume.find("Volume") else {
            panic!("volume missing");
        };
        assert_eq!(bars.len(), 130);
    }

    #[test]
    fn fibonacci_flow_through_events() {
        let mut c = controller();
        assert!(c.handle(ChartEvent::ActivateFibonacci));
        // The button click itself
        assert!(!c.handle(ChartEvent::PointerClick(None)));
        assert!(!c.handle(ChartEvent::PointerClick(None)));
        assert!(c.handle(ChartEvent::PointerClick(at(140.0, 100.0))));

        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        assert!(target.names().contains(&"Fib anchor"));

        assert!(c.handle(ChartEvent::PointerMove(at(150.0, 90.0))));
        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        assert!(target.names().contains(&"Fib preview 50.0%"));

        assert!(!c.handle(ChartEvent::PointerClick(at(150.0, 100.001))));
        assert!(c.handle(ChartEvent::PointerClick(at(150.0, 80.0))));

        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        let hlines = target.hlines();
        for expected in [100.0, 95.28, 92.36, 90.0, 87.64, 84.28, 80.0] {
            assert!(hlines.iter().any(|y| (y - expected).abs() < 1e-9));
        }
        assert!(target.texts().iter().any(|t| t.starts_with("61.8%")));
        assert!(!target.names().contains(&"Fib anchor"));
        assert!(c.price_bounds().unwrap().0 <= 80.0);

        // Other symbols have their own, untouched tool
        c.handle(ChartEvent::SelectSymbol(1));
        assert_eq!(c.active_view().unwrap().fibonacci().phase(), &FibPhase::Inactive);
        c.handle(ChartEvent::SelectSymbol(0));
        assert!(c.active_view().unwrap().fibonacci().annotation().is_some());

        assert!(c.handle(ChartEvent::Cancel));
        assert!(c.active_view().unwrap().fibonacci().annotation().is_none());
    }

    #[test]
    fn empty_controller_ignores_events() {
        let mut c = ChartController::new(Vec::new(), TimeWindow::default());
        assert!(!c.handle(ChartEvent::ActivateFibonacci));
        assert!(!c.handle(ChartEvent::CycleSymbol(1)));
        let mut target = RecordingTarget::new();
        c.render_price(&mut target);
        assert!(target.ops.is_empty());
        assert_eq!(c.price_bounds(), None);
    }
}
