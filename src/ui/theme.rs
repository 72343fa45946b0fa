//! Color themes for the UI.

use crate::app::Theme;
use ratatui::style::Color;

/// Gruvbox palette, named after the Gruvbox roles.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Main background.
    pub bg0: Color,
    /// Status bar background.
    pub bg1: Color,
    /// Borders.
    pub bg2: Color,
    /// Primary text.
    pub fg0: Color,
    /// Secondary text.
    pub fg1: Color,
    /// Dimmed text.
    pub gray: Color,
    /// Titles and cursor.
    pub yellow: Color,
    /// Labels.
    pub green: Color,
    /// Values.
    pub aqua: Color,
    /// Selected entries.
    pub orange: Color,
    /// Error messages.
    pub red: Color,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self {
                bg0: Color::Rgb(40, 40, 40),
                bg1: Color::Rgb(60, 56, 54),
                bg2: Color::Rgb(102, 92, 84),
                fg0: Color::Rgb(235, 219, 178),
                fg1: Color::Rgb(213, 196, 161),
                gray: Color::Rgb(146, 131, 116),
                yellow: Color::Rgb(250, 189, 47),
                green: Color::Rgb(184, 187, 38),
                aqua: Color::Rgb(142, 192, 124),
                orange: Color::Rgb(254, 128, 25),
                red: Color::Rgb(251, 73, 52),
            },
            Theme::GruvboxLight => Self {
                bg0: Color::Rgb(251, 241, 199),
                bg1: Color::Rgb(235, 219, 178),
                bg2: Color::Rgb(213, 196, 161),
                fg0: Color::Rgb(60, 56, 54),
                fg1: Color::Rgb(80, 73, 69),
                gray: Color::Rgb(146, 131, 116),
                yellow: Color::Rgb(181, 118, 20),
                green: Color::Rgb(121, 116, 14),
                aqua: Color::Rgb(66, 123, 88),
                orange: Color::Rgb(175, 58, 3),
                red: Color::Rgb(157, 0, 6),
            },
        }
    }
}
