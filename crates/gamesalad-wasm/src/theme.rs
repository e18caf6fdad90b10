//! Color themes for the canvas UI

use gamesalad_core::ThemeKind;
use serde::{Deserialize, Serialize};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn as_css_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Color theme for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Page background
    pub background: Color,
    /// Idle cell fill
    pub cell_bg: Color,
    /// Cell outline
    pub cell_border: Color,
    /// Letter on an idle cell
    pub letter: Color,
    /// Selected cell fill
    pub selected_bg: Color,
    /// Line joining the selected cells
    pub trail: Color,
    /// Cells of the word just found
    pub found_bg: Color,
    /// Words still hidden in the list
    pub masked_text: Color,
    /// Found words in the list
    pub found_text: Color,
    /// Info panel text
    pub info_text: Color,
    /// Message text
    pub message_text: Color,
    /// Victory banner
    pub win_color: Color,
}

impl Theme {
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
            ThemeKind::HighContrast => Self::high_contrast(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            background: Color::new(24, 24, 32),
            cell_bg: Color::new(40, 42, 58),
            cell_border: Color::new(90, 95, 130),
            letter: Color::new(230, 230, 240),
            selected_bg: Color::new(70, 100, 150),
            trail: Color::new(255, 220, 100),
            found_bg: Color::new(40, 120, 70),
            masked_text: Color::new(110, 110, 135),
            found_text: Color::new(100, 255, 150),
            info_text: Color::new(160, 160, 180),
            message_text: Color::new(255, 220, 100),
            win_color: Color::new(100, 255, 150),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            background: Color::new(245, 245, 250),
            cell_bg: Color::new(255, 255, 255),
            cell_border: Color::new(170, 170, 195),
            letter: Color::new(20, 20, 40),
            selected_bg: Color::new(180, 210, 255),
            trail: Color::new(30, 100, 200),
            found_bg: Color::new(200, 240, 200),
            masked_text: Color::new(150, 150, 170),
            found_text: Color::new(40, 150, 70),
            info_text: Color::new(60, 60, 80),
            message_text: Color::new(180, 120, 0),
            win_color: Color::new(50, 180, 80),
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            background: Color::new(0, 0, 0),
            cell_bg: Color::new(0, 0, 0),
            cell_border: Color::new(255, 255, 255),
            letter: Color::new(255, 255, 0),
            selected_bg: Color::new(0, 80, 160),
            trail: Color::new(0, 255, 255),
            found_bg: Color::new(0, 100, 0),
            masked_text: Color::new(170, 170, 170),
            found_text: Color::new(0, 255, 0),
            info_text: Color::new(220, 220, 220),
            message_text: Color::new(255, 255, 0),
            win_color: Color::new(0, 255, 0),
        }
    }
}
