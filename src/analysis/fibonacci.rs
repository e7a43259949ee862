use serde::{Deserialize, Serialize};

use crate::config::constants::fibonacci::{GOLDEN_RATIO_LEVEL, LEVELS, MIN_RANGE};
use crate::error::TrackError;

/// A point on the price chart. `x` is the position in the full series (fractional while
/// the pointer sits between two days), `price` is in quote currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub price: f64,
}

impl AnchorPoint {
    pub fn new(x: f64, price: f64) -> Self {
        Self { x, price }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    /// 0.0 ..= 1.0, measured down from the high
    pub ratio: f64,
    pub price: f64,
    pub golden: bool,
}

impl FibLevel {
    pub fn label(&self) -> String {
        format!("{:.1}%", self.ratio * 100.0)
    }
}

/// Price at each retracement ratio between `high` and `low`: `high - (high - low) * ratio`.
pub fn retracement_levels(high: f64, low: f64) -> [FibLevel; LEVELS.len()] {
    let range = high - low;
    LEVELS.map(|ratio| FibLevel {
        ratio,
        price: high - range * ratio,
        golden: (ratio - GOLDEN_RATIO_LEVEL).abs() < f64::EPSILON,
    })
}

/// A finalized retracement drawn between two user-chosen points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciAnnotation {
    pub first: AnchorPoint,
    pub second: AnchorPoint,
    pub high: f64,
    pub low: f64,
    pub levels: [FibLevel; LEVELS.len()],
}

impl FibonacciAnnotation {
    /// Fails when the two prices are closer than the minimum drawable range.
    pub fn from_points(first: AnchorPoint, second: AnchorPoint) -> Result<Self, TrackError> {
        let high = first.price.max(second.price);
        let low = first.price.min(second.price);
        let span = high - low;
        if span < MIN_RANGE {
            return Err(TrackError::DegenerateFibonacciRange { span });
        }
        Ok(Self {
            first,
            second,
            high,
            low,
            levels: retracement_levels(high, low),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_from_100_to_80() {
        let ann =
            FibonacciAnnotation::from_points(AnchorPoint::new(3.0, 100.0), AnchorPoint::new(40.0, 80.0))
                .unwrap();
        let prices: Vec<f64> = ann.levels.iter().map(|l| l.price).collect();
        let expected = [100.0, 95.28, 92.36, 90.0, 87.64, 84.28, 80.0];
        for (p, e) in prices.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9, "{} != {}", p, e);
        }
        assert_eq!(ann.high, 100.0);
        assert_eq!(ann.low, 80.0);
        assert_eq!(ann.first.x, 3.0);
    }

    #[test]
    fn point_order_does_not_matter() {
        let a = AnchorPoint::new(10.0, 80.0);
        let b = AnchorPoint::new(2.0, 100.0);
        let ann = FibonacciAnnotation::from_points(a, b).unwrap();
        assert_eq!(ann.levels[0].price, 100.0);
        assert_eq!(ann.levels[6].price, 80.0);
    }

    #[test]
    fn only_the_618_level_is_golden() {
        let golden: Vec<String> = retracement_levels(10.0, 0.0)
            .iter()
            .filter(|l| l.golden)
            .map(FibLevel::label)
            .collect();
        assert_eq!(golden, vec!["61.8%"]);
    }

    #[test]
    fn tiny_drag_is_rejected() {
        let err = FibonacciAnnotation::from_points(
            AnchorPoint::new(1.0, 50.0),
            AnchorPoint::new(9.0, 50.005),
        )
        .unwrap_err();
        assert!(matches!(err, TrackError::DegenerateFibonacciRange { .. }));
    }
}
