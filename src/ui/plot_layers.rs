use std::ops::Range;

use eframe::egui::Color32;

use crate::analysis::{FibLevel, IndicatorKey};
use crate::config::plot::PLOT_CONFIG;
use crate::domain::CandleType;
use crate::models::{Artifact, SymbolAnalysis, ViewState};
use crate::ui::draw_target::{BarSpec, DrawTarget, LineSpec};
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::format_price;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub analysis: &'a SymbolAnalysis,
    pub view: &'a ViewState,
    /// Rows of the active time window, as indices into the full series.
    pub range: Range<usize>,
}

impl LayerContext<'_> {
    /// Defined points of one indicator line inside the window.
    fn indicator_points(&self, key: IndicatorKey) -> Vec<[f64; 2]> {
        self.analysis
            .indicators
            .slice(key, self.range.clone())
            .map(|line| {
                line.iter()
                    .zip(self.range.clone())
                    .filter_map(|(v, i)| v.map(|y| [i as f64, y]))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn right_edge(&self) -> f64 {
        self.range.end.saturating_sub(1) as f64
    }
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext);
}

// ============================================================================
// Bollinger Bands: shaded band first so every line sits on top of it
// ============================================================================
pub struct BollingerLayer;

impl PlotLayer for BollingerLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext) {
        if !ctx.view.artifact_visible(Artifact::BollingerFill) {
            return;
        }

        // Upper and lower share the same warm-up, so their points line up
        let upper = ctx.indicator_points(IndicatorKey::BollingerUpper);
        let lower = ctx.indicator_points(IndicatorKey::BollingerLower);
        let fill = PLOT_CONFIG
            .bollinger_edge_color
            .linear_multiply(PLOT_CONFIG.bollinger_fill_opacity_pct);
        target.fill_between(
            &Artifact::BollingerFill.to_string(),
            upper.clone(),
            lower.clone(),
            fill,
        );

        let edge = LineSpec::solid(PLOT_CONFIG.bollinger_edge_color, PLOT_CONFIG.bollinger_line_width);
        target.line(&Artifact::BollingerUpper.to_string(), upper, edge);
        target.line(&Artifact::BollingerLower.to_string(), lower, edge);
        target.line(
            &Artifact::BollingerMiddle.to_string(),
            ctx.indicator_points(IndicatorKey::BollingerMiddle),
            LineSpec::dashed(
                PLOT_CONFIG.bollinger_middle_color,
                PLOT_CONFIG.bollinger_line_width,
                PLOT_CONFIG.ma_dash_length,
            ),
        );
    }
}

// ============================================================================
// Close price (always shown)
// ============================================================================
pub struct PriceLineLayer;

impl PlotLayer for PriceLineLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext) {
        let closes = &ctx.analysis.series.close_prices;
        let points = ctx
            .range
            .clone()
            .filter_map(|i| closes.get(i).map(|c| [i as f64, *c]))
            .collect();
        target.line(
            &format!("{} {}", ctx.analysis.symbol(), UI_TEXT.label_close),
            points,
            LineSpec::solid(PLOT_CONFIG.price_line_color, PLOT_CONFIG.price_line_width),
        );
    }
}

// ============================================================================
// Moving averages
// ============================================================================
pub struct MovingAverageLayer;

impl PlotLayer for MovingAverageLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext) {
        let ma_artifacts = [
            Artifact::Ma10,
            Artifact::Ma20,
            Artifact::Ma50,
            Artifact::Ma60,
            Artifact::Ma200,
        ];
        for (artifact, color) in ma_artifacts.into_iter().zip(PLOT_CONFIG.ma_colors) {
            if !ctx.view.artifact_visible(artifact) {
                continue;
            }
            let Some(key) = artifact.indicator_key() else {
                continue;
            };
            let points = ctx.indicator_points(key);
            if points.is_empty() {
                continue;
            }
            target.line(
                &artifact.to_string(),
                points,
                LineSpec::dashed(color, PLOT_CONFIG.ma_line_width, PLOT_CONFIG.ma_dash_length),
            );
        }
    }
}

// ============================================================================
// Latest close: dotted guide plus a price tag at the right edge
// ============================================================================
pub struct LatestPriceLayer;

impl PlotLayer for LatestPriceLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext) {
        let Some(price) = ctx.analysis.series.latest_close() else {
            return;
        };
        target.hline(
            &UI_TEXT.label_latest_price,
            price,
            LineSpec::dashed(PLOT_CONFIG.latest_price_color, PLOT_CONFIG.latest_price_width, 4.0),
        );
        target.text(
            [ctx.right_edge(), price],
            &format!("{} {}", UI_TEXT.label_latest, format_price(price)),
            PLOT_CONFIG.latest_price_color,
        );
    }
}

// ============================================================================
// Fibonacci: finalized levels, live preview, crosshair on the first anchor
// ============================================================================
pub struct FibonacciLayer;

fn level_spec(level: &FibLevel, opacity: f32) -> LineSpec {
    let (color, width) = if level.golden {
        (PLOT_CONFIG.fib_golden_color, PLOT_CONFIG.fib_golden_width)
    } else {
        (PLOT_CONFIG.fib_level_color, PLOT_CONFIG.fib_level_width)
    };
    LineSpec::dashed(color.linear_multiply(opacity), width, 6.0)
}

fn label_color(level: &FibLevel) -> Color32 {
    if level.golden {
        PLOT_CONFIG.fib_golden_color
    } else {
        PLOT_CONFIG.fib_level_color
    }
}

impl PlotLayer for FibonacciLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext) {
        let tool = ctx.view.fibonacci();
        let label_x = ctx.right_edge();

        if let Some(ann) = tool.annotation() {
            for level in &ann.levels {
                target.hline(&format!("Fib {}", level.label()), level.price, level_spec(level, 1.0));
                target.text(
                    [label_x, level.price],
                    &format!("{} ({})", level.label(), format_price(level.price)),
                    label_color(level),
                );
            }
        }

        if let Some(preview) = tool.preview() {
            for level in &preview.levels {
                target.hline(
                    &format!("Fib preview {}", level.label()),
                    level.price,
                    level_spec(level, PLOT_CONFIG.fib_preview_opacity_pct),
                );
            }
        }

        if tool.is_drawing() {
            if let Some(first) = tool.first_point() {
                target.markers(
                    &UI_TEXT.label_fib_anchor,
                    vec![[first.x, first.price]],
                    PLOT_CONFIG.fib_crosshair_color,
                    PLOT_CONFIG.fib_crosshair_radius,
                );
            }
        }
    }
}

// ============================================================================
// Volume panel
// ============================================================================
pub struct VolumeLayer;

impl PlotLayer for VolumeLayer {
    fn render(&self, target: &mut dyn DrawTarget, ctx: &LayerContext) {
        let series = &ctx.analysis.series;
        let bars = ctx
            .range
            .clone()
            .filter(|&i| i < series.len())
            .map(|i| {
                let color = match series.get_candle(i).get_type() {
                    CandleType::Bullish => PLOT_CONFIG.volume_up_color,
                    CandleType::Bearish => PLOT_CONFIG.volume_down_color,
                };
                BarSpec {
                    x: i as f64,
                    height: series.volumes[i],
                    width: PLOT_CONFIG.volume_bar_width_pct,
                    color,
                }
            })
            .collect();
        target.bars(&UI_TEXT.label_volume, bars);
    }
}

/// Price panel stack, bottom to top.
pub fn price_layers() -> Vec<Box<dyn PlotLayer>> {
    vec![
        Box::new(BollingerLayer),
        Box::new(PriceLineLayer),
        Box::new(MovingAverageLayer),
        Box::new(LatestPriceLayer),
        Box::new(FibonacciLayer),
    ]
}

pub fn volume_layers() -> Vec<Box<dyn PlotLayer>> {
    vec![Box::new(VolumeLayer)]
}
