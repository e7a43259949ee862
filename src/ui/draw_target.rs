use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpec {
    pub color: Color32,
    pub width: f32,
    /// Dash length in screen points, `None` for solid.
    pub dash: Option<f32>,
}

impl LineSpec {
    pub fn solid(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color32, width: f32, length: f32) -> Self {
        Self {
            color,
            width,
            dash: Some(length),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpec {
    pub x: f64,
    pub height: f64,
    pub width: f64,
    pub color: Color32,
}

/// Anything the chart layers can draw onto. Coordinates are plot coordinates:
/// x is the position in the full series, y is price (or volume).
pub trait DrawTarget {
    fn line(&mut self, name: &str, points: Vec<[f64; 2]>, spec: LineSpec);

    /// Horizontal line across the whole plot.
    fn hline(&mut self, name: &str, y: f64, spec: LineSpec);

    /// Shaded band between two polylines sampled at the same x positions.
    fn fill_between(&mut self, name: &str, upper: Vec<[f64; 2]>, lower: Vec<[f64; 2]>, color: Color32);

    fn bars(&mut self, name: &str, bars: Vec<BarSpec>);

    fn markers(&mut self, name: &str, points: Vec<[f64; 2]>, color: Color32, radius: f32);

    fn text(&mut self, at: [f64; 2], text: &str, color: Color32);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line { name: String, points: Vec<[f64; 2]>, spec: LineSpec },
    HLine { name: String, y: f64, spec: LineSpec },
    Fill { name: String, upper: Vec<[f64; 2]>, lower: Vec<[f64; 2]> },
    Bars { name: String, bars: Vec<BarSpec> },
    Markers { name: String, points: Vec<[f64; 2]> },
    Text { at: [f64; 2], text: String },
}

impl DrawOp {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Line { name, .. }
            | Self::HLine { name, .. }
            | Self::Fill { name, .. }
            | Self::Bars { name, .. }
            | Self::Markers { name, .. } => Some(name),
            Self::Text { .. } => None,
        }
    }
}

/// Headless target that just remembers what was drawn, in order.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub ops: Vec<DrawOp>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.ops.iter().filter_map(DrawOp::name).collect()
    }

    pub fn find(&self, name: &str) -> Option<&DrawOp> {
        self.ops.iter().find(|op| op.name() == Some(name))
    }

    pub fn hlines(&self) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::HLine { y, .. } => Some(*y),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawTarget for RecordingTarget {
    fn line(&mut self, name: &str, points: Vec<[f64; 2]>, spec: LineSpec) {
        self.ops.push(DrawOp::Line {
            name: name.to_string(),
            points,
            spec,
        });
    }

    fn hline(&mut self, name: &str, y: f64, spec: LineSpec) {
        self.ops.push(DrawOp::HLine {
            name: name.to_string(),
            y,
            spec,
        });
    }

    fn fill_between(&mut self, name: &str, upper: Vec<[f64; 2]>, lower: Vec<[f64; 2]>, _color: Color32) {
        self.ops.push(DrawOp::Fill {
            name: name.to_string(),
            upper,
            lower,
        });
    }

    fn bars(&mut self, name: &str, bars: Vec<BarSpec>) {
        self.ops.push(DrawOp::Bars {
            name: name.to_string(),
            bars,
        });
    }

    fn markers(&mut self, name: &str, points: Vec<[f64; 2]>, _color: Color32, _radius: f32) {
        self.ops.push(DrawOp::Markers {
            name: name.to_string(),
            points,
        });
    }

    fn text(&mut self, at: [f64; 2], text: &str, _color: Color32) {
        self.ops.push(DrawOp::Text {
            at,
            text: text.to_string(),
        });
    }
}
