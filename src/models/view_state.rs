use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::analysis::IndicatorKey;
use crate::error::TrackError;
use crate::models::FibonacciTool;

/// Toggleable chart overlays. The price line is always shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, Display,
)]
pub enum Overlay {
    #[strum(to_string = "MA10")]
    Ma10,
    #[strum(to_string = "MA20")]
    Ma20,
    #[strum(to_string = "MA50")]
    Ma50,
    #[strum(to_string = "MA60")]
    Ma60,
    #[strum(to_string = "MA200")]
    Ma200,
    #[strum(to_string = "Bollinger Bands")]
    BollingerBands,
}

impl Overlay {
    pub fn moving_average_window(&self) -> Option<usize> {
        match self {
            Self::Ma10 => Some(10),
            Self::Ma20 => Some(20),
            Self::Ma50 => Some(50),
            Self::Ma60 => Some(60),
            Self::Ma200 => Some(200),
            Self::BollingerBands => None,
        }
    }
}

/// Something drawn on the chart that shows up as its own legend entry.
/// Several artifacts can share one overlay, and therefore one visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Artifact {
    #[strum(to_string = "MA10")]
    Ma10,
    #[strum(to_string = "MA20")]
    Ma20,
    #[strum(to_string = "MA50")]
    Ma50,
    #[strum(to_string = "MA60")]
    Ma60,
    #[strum(to_string = "MA200")]
    Ma200,
    #[strum(to_string = "BB Upper")]
    BollingerUpper,
    #[strum(to_string = "BB Middle")]
    BollingerMiddle,
    #[strum(to_string = "BB Lower")]
    BollingerLower,
    #[strum(to_string = "BB Band")]
    BollingerFill,
}

impl Artifact {
    pub fn overlay(&self) -> Overlay {
        match self {
            Self::Ma10 => Overlay::Ma10,
            Self::Ma20 => Overlay::Ma20,
            Self::Ma50 => Overlay::Ma50,
            Self::Ma60 => Overlay::Ma60,
            Self::Ma200 => Overlay::Ma200,
            Self::BollingerUpper
            | Self::BollingerMiddle
            | Self::BollingerLower
            | Self::BollingerFill => Overlay::BollingerBands,
        }
    }

    /// The indicator line this artifact draws. The fill spans two lines and has none.
    pub fn indicator_key(&self) -> Option<IndicatorKey> {
        match self {
            Self::BollingerUpper => Some(IndicatorKey::BollingerUpper),
            Self::BollingerMiddle => Some(IndicatorKey::BollingerMiddle),
            Self::BollingerLower => Some(IndicatorKey::BollingerLower),
            Self::BollingerFill => None,
            ma => ma
                .overlay()
                .moving_average_window()
                .map(IndicatorKey::MovingAverage),
        }
    }
}

/// Display window in trading days.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
    clap::ValueEnum,
)]
pub enum TimeWindow {
    #[strum(to_string = "1M")]
    #[value(name = "1m")]
    OneMonth,
    #[strum(to_string = "3M")]
    #[value(name = "3m")]
    ThreeMonths,
    #[default]
    #[strum(to_string = "6M")]
    #[value(name = "6m")]
    SixMonths,
}

impl TimeWindow {
    pub fn trading_days(&self) -> usize {
        match self {
            Self::OneMonth => 22,
            Self::ThreeMonths => 65,
            Self::SixMonths => 130,
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Self::OneMonth => "1-Month",
            Self::ThreeMonths => "3-Month",
            Self::SixMonths => "6-Month",
        }
    }
}

/// What the user currently sees for one symbol.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    visible: BTreeSet<Overlay>,
    time_window: TimeWindow,
    fibonacci: FibonacciTool,
}

impl ViewState {
    pub fn new(time_window: TimeWindow) -> Self {
        Self {
            time_window,
            ..Self::default()
        }
    }

    /// Flips one overlay and returns its new visibility.
    pub fn toggle(&mut self, overlay: Overlay) -> bool {
        if !self.visible.remove(&overlay) {
            self.visible.insert(overlay);
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self, overlay: Overlay) -> bool {
        self.visible.contains(&overlay)
    }

    pub fn artifact_visible(&self, artifact: Artifact) -> bool {
        self.is_visible(artifact.overlay())
    }

    pub fn visible(&self) -> &BTreeSet<Overlay> {
        &self.visible
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Re-slicing only: the computed series are untouched.
    pub fn set_time_window(&mut self, window: TimeWindow) {
        self.time_window = window;
    }

    pub fn fibonacci(&self) -> &FibonacciTool {
        &self.fibonacci
    }

    pub fn fibonacci_mut(&mut self) -> &mut FibonacciTool {
        &mut self.fibonacci
    }
}

/// View states keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct ViewStates {
    views: HashMap<String, ViewState>,
}

impl ViewStates {
    pub fn insert(&mut self, symbol: impl Into<String>, view: ViewState) {
        self.views.insert(symbol.into(), view);
    }

    pub fn get(&self, symbol: &str) -> Result<&ViewState, TrackError> {
        self.views.get(symbol).ok_or_else(|| unknown(symbol))
    }

    pub fn get_mut(&mut self, symbol: &str) -> Result<&mut ViewState, TrackError> {
        self.views.get_mut(symbol).ok_or_else(|| unknown(symbol))
    }

    pub fn toggle_overlay(&mut self, symbol: &str, overlay: Overlay) -> Result<bool, TrackError> {
        Ok(self.get_mut(symbol)?.toggle(overlay))
    }

    pub fn set_time_window(&mut self, symbol: &str, window: TimeWindow) -> Result<(), TrackError> {
        self.get_mut(symbol)?.set_time_window(window);
        Ok(())
    }

    pub fn current_visible(&self, symbol: &str) -> Result<BTreeSet<Overlay>, TrackError> {
        Ok(self.get(symbol)?.visible().clone())
    }
}

fn unknown(symbol: &str) -> TrackError {
    TrackError::UnknownSymbol {
        symbol: symbol.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn states() -> ViewStates {
        let mut s = ViewStates::default();
        s.insert("AAPL", ViewState::default());
        s.insert("MSFT", ViewState::default());
        s
    }

    #[test]
    fn defaults_show_nothing_over_six_months() {
        let view = ViewState::default();
        assert!(view.visible().is_empty());
        assert_eq!(view.time_window(), TimeWindow::SixMonths);
        assert_eq!(view.time_window().trading_days(), 130);
    }

    #[test]
    fn toggling_twice_restores_visibility() {
        let mut s = states();
        for overlay in Overlay::iter() {
            let before = s.current_visible("AAPL").unwrap();
            assert!(s.toggle_overlay("AAPL", overlay).unwrap());
            assert!(!s.toggle_overlay("AAPL", overlay).unwrap());
            assert_eq!(s.current_visible("AAPL").unwrap(), before);
        }
    }

    #[test]
    fn bollinger_artifacts_share_one_flag() {
        let mut view = ViewState::default();
        let bb: Vec<Artifact> = Artifact::iter()
            .filter(|a| a.overlay() == Overlay::BollingerBands)
            .collect();
        assert_eq!(bb.len(), 4);

        // Picking any one constituent flips all four together
        for picked in &bb {
            let now = view.toggle(picked.overlay());
            assert!(bb.iter().all(|a| view.artifact_visible(*a) == now));
        }
    }

    #[test]
    fn views_are_independent_per_symbol() {
        let mut s = states();
        s.toggle_overlay("AAPL", Overlay::Ma50).unwrap();
        s.set_time_window("AAPL", TimeWindow::OneMonth).unwrap();

        assert!(s.current_visible("MSFT").unwrap().is_empty());
        assert_eq!(s.get("MSFT").unwrap().time_window(), TimeWindow::SixMonths);
        assert_eq!(s.get("AAPL").unwrap().time_window().trading_days(), 22);
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let mut s = states();
        assert_eq!(
            s.toggle_overlay("TSLA", Overlay::Ma10),
            Err(TrackError::UnknownSymbol {
                symbol: "TSLA".into()
            })
        );
        assert!(s.current_visible("TSLA").is_err());
    }

    #[test]
    fn artifact_to_indicator_mapping() {
        assert_eq!(
            Artifact::Ma200.indicator_key(),
            Some(IndicatorKey::MovingAverage(200))
        );
        assert_eq!(Artifact::BollingerFill.indicator_key(), None);
        assert_eq!(Overlay::Ma60.moving_average_window(), Some(60));
        assert_eq!(Overlay::BollingerBands.moving_average_window(), None);
    }
}
