//! Color theme for the TUI

use ratatui::style::Color;

/// Named colors used across views and components.
///
/// One built-in dark theme; every consumer reads from here rather than
/// hardcoding colors.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_color: Color,
    pub text_color: Color,
    pub dim_color: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub accent_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
    pub error_color: Color,
    pub status_bar_bg_color: Color,
    pub highlight_bg_color: Color,
    pub gutter_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_color: Color::Rgb(16, 18, 24),
            text_color: Color::Rgb(214, 219, 230),
            dim_color: Color::Rgb(108, 115, 130),
            border_color: Color::Rgb(62, 68, 82),
            title_color: Color::Rgb(235, 203, 139),
            accent_color: Color::Rgb(129, 161, 193),
            success_color: Color::Rgb(163, 190, 140),
            warning_color: Color::Rgb(235, 203, 139),
            error_color: Color::Rgb(191, 97, 106),
            status_bar_bg_color: Color::Rgb(24, 27, 35),
            highlight_bg_color: Color::Rgb(34, 38, 48),
            gutter_color: Color::Rgb(76, 82, 96),
        }
    }
}
