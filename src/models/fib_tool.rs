use crate::analysis::{AnchorPoint, FibLevel, FibonacciAnnotation, retracement_levels};
use crate::config::DF;
use crate::config::constants::fibonacci::LEVELS;

/// Where the two-click retracement tool currently is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FibPhase {
    #[default]
    Inactive,
    AwaitingFirstPoint,
    AwaitingSecondPoint {
        first: AnchorPoint,
    },
    Finalized(FibonacciAnnotation),
}

/// What an input did to the tool. Callers use it to decide whether to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FibOutcome {
    /// Input had no effect in the current phase.
    Ignored,
    /// The activation click itself, swallowed by the one-shot flag.
    Suppressed,
    Activated,
    FirstPointSet,
    PreviewUpdated,
    Finalized,
    /// Second point too close in price to the first; still waiting for it.
    Degenerate,
    Cancelled,
    Cleared,
}

impl FibOutcome {
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Self::Ignored | Self::Suppressed | Self::Degenerate)
    }
}

/// Live preview shown while the pointer moves before the second click.
#[derive(Debug, Clone, PartialEq)]
pub struct FibPreview {
    pub first: AnchorPoint,
    pub pointer: AnchorPoint,
    pub levels: [FibLevel; LEVELS.len()],
}

impl FibPreview {
    fn new(first: AnchorPoint, pointer: AnchorPoint) -> Self {
        Self {
            first,
            pointer,
            levels: retracement_levels(
                first.price.max(pointer.price),
                first.price.min(pointer.price),
            ),
        }
    }
}

/// Per-symbol Fibonacci drawing tool.
#[derive(Debug, Clone, Default)]
pub struct FibonacciTool {
    phase: FibPhase,
    /// One-shot: the click that pressed the tool button must not become point 1.
    ignore_next_click: bool,
    preview: Option<FibPreview>,
}

impl FibonacciTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &FibPhase {
        &self.phase
    }

    pub fn annotation(&self) -> Option<&FibonacciAnnotation> {
        match &self.phase {
            FibPhase::Finalized(ann) => Some(ann),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&FibPreview> {
        self.preview.as_ref()
    }

    /// First anchor, once placed. Used for the crosshair marker.
    pub fn first_point(&self) -> Option<AnchorPoint> {
        match &self.phase {
            FibPhase::AwaitingSecondPoint { first } => Some(*first),
            FibPhase::Finalized(ann) => Some(ann.first),
            _ => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(
            self.phase,
            FibPhase::AwaitingFirstPoint | FibPhase::AwaitingSecondPoint { .. }
        )
    }

    /// Tool button pressed. Any previous annotation or half-finished drawing is discarded.
    pub fn activate(&mut self) -> FibOutcome {
        if DF.log_fibonacci && self.annotation().is_some() {
            log::info!("Fibonacci: clearing previous annotation");
        }
        self.phase = FibPhase::AwaitingFirstPoint;
        self.preview = None;
        self.ignore_next_click = true;
        FibOutcome::Activated
    }

    /// A generic pointer click. `at` is `None` when the click landed outside the plot area.
    pub fn on_click(&mut self, at: Option<AnchorPoint>) -> FibOutcome {
        if self.ignore_next_click {
            self.ignore_next_click = false;
            return FibOutcome::Suppressed;
        }
        let Some(point) = at else {
            return FibOutcome::Ignored;
        };

        match &self.phase {
            FibPhase::AwaitingFirstPoint => {
                if DF.log_fibonacci {
                    log::info!("Fibonacci: first point {:?}", point);
                }
                self.phase = FibPhase::AwaitingSecondPoint { first: point };
                FibOutcome::FirstPointSet
            }
            FibPhase::AwaitingSecondPoint { first } => {
                match FibonacciAnnotation::from_points(*first, point) {
                    Ok(annotation) => {
                        if DF.log_fibonacci {
                            log::info!(
                                "Fibonacci: finalized {:.2} -> {:.2}",
                                annotation.high,
                                annotation.low
                            );
                        }
                        self.preview = None;
                        self.phase = FibPhase::Finalized(annotation);
                        FibOutcome::Finalized
                    }
                    Err(e) => {
                        log::debug!("Fibonacci: {}", e);
                        FibOutcome::Degenerate
                    }
                }
            }
            FibPhase::Inactive | FibPhase::Finalized(_) => FibOutcome::Ignored,
        }
    }

    pub fn on_pointer_move(&mut self, at: Option<AnchorPoint>) -> FibOutcome {
        match (&self.phase, at) {
            (FibPhase::AwaitingSecondPoint { first }, Some(pointer)) => {
                self.preview = Some(FibPreview::new(*first, pointer));
                FibOutcome::PreviewUpdated
            }
            _ => FibOutcome::Ignored,
        }
    }

    /// Escape: abandon a drawing in progress, or remove the finished annotation.
    pub fn cancel(&mut self) -> FibOutcome {
        let outcome = match self.phase {
            FibPhase::Inactive => return FibOutcome::Ignored,
            FibPhase::Finalized(_) => FibOutcome::Cleared,
            _ => FibOutcome::Cancelled,
        };
        if DF.log_fibonacci {
            log::info!("Fibonacci: {:?}", outcome);
        }
        self.phase = FibPhase::Inactive;
        self.preview = None;
        self.ignore_next_click = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, price: f64) -> Option<AnchorPoint> {
        Some(AnchorPoint::new(x, price))
    }

    /// Activates and consumes the activation click, leaving the tool waiting for point 1.
    fn armed() -> FibonacciTool {
        let mut tool = FibonacciTool::new();
        assert_eq!(tool.activate(), FibOutcome::Activated);
        assert_eq!(tool.on_click(None), FibOutcome::Suppressed);
        tool
    }

    #[test]
    fn inactive_tool_ignores_everything() {
        let mut tool = FibonacciTool::new();
        assert_eq!(tool.on_click(p(1.0, 10.0)), FibOutcome::Ignored);
        assert_eq!(tool.on_pointer_move(p(1.0, 10.0)), FibOutcome::Ignored);
        assert_eq!(tool.cancel(), FibOutcome::Ignored);
        assert_eq!(tool.phase(), &FibPhase::Inactive);
    }

    #[test]
    fn activation_click_is_swallowed_even_inside_plot() {
        let mut tool = FibonacciTool::new();
        tool.activate();
        assert_eq!(tool.on_click(p(5.0, 100.0)), FibOutcome::Suppressed);
        assert_eq!(tool.phase(), &FibPhase::AwaitingFirstPoint);
        assert_eq!(tool.on_click(p(5.0, 100.0)), FibOutcome::FirstPointSet);
    }

    #[test]
    fn two_clicks_finalize() {
        let mut tool = armed();
        assert_eq!(tool.on_click(p(2.0, 100.0)), FibOutcome::FirstPointSet);
        assert_eq!(tool.first_point(), p(2.0, 100.0));

        assert_eq!(tool.on_pointer_move(p(6.0, 90.0)), FibOutcome::PreviewUpdated);
        let preview = tool.preview().unwrap();
        assert_eq!(preview.levels[3].price, 95.0);
        assert_eq!(tool.on_pointer_move(p(8.0, 80.0)), FibOutcome::PreviewUpdated);
        assert_eq!(tool.preview().unwrap().pointer, AnchorPoint::new(8.0, 80.0));

        assert_eq!(tool.on_click(p(8.0, 80.0)), FibOutcome::Finalized);
        assert!(tool.preview().is_none());
        let ann = tool.annotation().unwrap();
        assert!((ann.levels[4].price - 87.64).abs() < 1e-9);
        assert!(!tool.is_drawing());

        // Further clicks do nothing until re-activation
        assert_eq!(tool.on_click(p(1.0, 1.0)), FibOutcome::Ignored);
    }

    #[test]
    fn clicks_outside_plot_are_no_ops() {
        let mut tool = armed();
        assert_eq!(tool.on_click(None), FibOutcome::Ignored);
        assert_eq!(tool.phase(), &FibPhase::AwaitingFirstPoint);
        tool.on_click(p(1.0, 50.0));
        assert_eq!(tool.on_pointer_move(None), FibOutcome::Ignored);
        assert_eq!(tool.on_click(None), FibOutcome::Ignored);
        assert!(matches!(tool.phase(), FibPhase::AwaitingSecondPoint { .. }));
    }

    #[test]
    fn degenerate_second_click_keeps_waiting() {
        let mut tool = armed();
        tool.on_click(p(1.0, 50.0));
        assert_eq!(tool.on_click(p(9.0, 50.004)), FibOutcome::Degenerate);
        assert!(tool.annotation().is_none());
        assert_eq!(tool.first_point(), p(1.0, 50.0));
        assert_eq!(tool.on_click(p(9.0, 60.0)), FibOutcome::Finalized);
    }

    #[test]
    fn cancel_while_drawing_returns_to_inactive() {
        let mut tool = armed();
        tool.on_click(p(1.0, 50.0));
        tool.on_pointer_move(p(3.0, 40.0));
        assert_eq!(tool.cancel(), FibOutcome::Cancelled);
        assert_eq!(tool.phase(), &FibPhase::Inactive);
        assert!(tool.preview().is_none());
        assert!(tool.first_point().is_none());
    }

    #[test]
    fn cancel_before_activation_click_resets_flag() {
        let mut tool = FibonacciTool::new();
        tool.activate();
        assert_eq!(tool.cancel(), FibOutcome::Cancelled);
        // Flag was cleared, so a fresh activation swallows exactly one click again
        tool.activate();
        assert_eq!(tool.on_click(p(1.0, 1.0)), FibOutcome::Suppressed);
        assert_eq!(tool.on_click(p(1.0, 1.0)), FibOutcome::FirstPointSet);
    }

    #[test]
    fn cancel_or_reactivate_clears_finalized() {
        let mut tool = armed();
        tool.on_click(p(1.0, 50.0));
        tool.on_click(p(4.0, 70.0));
        assert!(tool.annotation().is_some());

        tool.activate();
        assert!(tool.annotation().is_none());
        assert_eq!(tool.phase(), &FibPhase::AwaitingFirstPoint);

        tool.on_click(None);
        tool.on_click(p(1.0, 50.0));
        tool.on_click(p(4.0, 70.0));
        assert_eq!(tool.cancel(), FibOutcome::Cleared);
        assert!(tool.annotation().is_none());
        assert_eq!(tool.phase(), &FibPhase::Inactive);
    }
}
