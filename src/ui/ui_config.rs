use eframe::egui::{Color32, Frame, Margin, Stroke};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub positive: Color32,
    pub negative: Color32,
    pub hint: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
}

#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub legend_width: f32,
}

pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        positive: Color32::from_rgb(38, 166, 154),
        negative: Color32::from_rgb(239, 83, 80),
        hint: Color32::from_rgb(255, 200, 90),
        central_panel: Color32::from_rgb(20, 20, 24),
        side_panel: Color32::from_rgb(25, 25, 25),
    },
    legend_width: 150.0,
};

impl UiConfig {
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Tighter vertically than the top bar
    pub fn bottom_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(8, 4),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin {
                left: 0,
                right: 8, // keeps the right-hand price axis off the window border
                top: 0,
                bottom: 0,
            },
            ..Default::default()
        }
    }
}
