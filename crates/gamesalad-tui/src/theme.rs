use crossterm::style::Color;
use gamesalad_core::ThemeKind;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Cell border color
    pub border: Color,
    /// Letter on an idle cell
    pub letter: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Letter on a selected cell
    pub selected_fg: Color,
    /// Cells of a word that was just found
    pub found: Color,
    /// Cells fading off the board
    pub retiring: Color,
    /// Words not found yet
    pub masked: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
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
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 90, g: 100, b: 125 },
            letter: Color::Rgb { r: 255, g: 255, b: 255 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            selected_fg: Color::Rgb { r: 255, g: 230, b: 120 },
            found: Color::Rgb { r: 90, g: 255, b: 130 },
            retiring: Color::Rgb { r: 80, g: 84, b: 100 },
            masked: Color::Rgb { r: 120, g: 128, b: 150 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 150, g: 150, b: 170 },
            letter: Color::Rgb { r: 0, g: 0, b: 0 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            selected_fg: Color::Rgb { r: 20, g: 40, b: 120 },
            found: Color::Rgb { r: 40, g: 160, b: 60 },
            retiring: Color::Rgb { r: 200, g: 200, b: 210 },
            masked: Color::Rgb { r: 130, g: 130, b: 150 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            letter: Color::Yellow,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            found: Color::Green,
            retiring: Color::DarkGrey,
            masked: Color::Grey,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
