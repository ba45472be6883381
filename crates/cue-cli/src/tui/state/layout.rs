//! Layout state - cached areas for hit testing
//!
//! Render code records where it drew each region; mouse handlers test
//! against these rects on the next event. `None` means the region was not
//! drawn in the last frame (e.g. prompter chrome while fullscreen).

use ratatui::layout::{Position, Rect};

#[derive(Debug, Default, Clone)]
pub struct LayoutState {
    /// Editor text area (inside borders, excluding the gutter).
    pub editor_area: Option<Rect>,
    /// Prompter text area.
    pub prompter_area: Option<Rect>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editor_contains(&self, x: u16, y: u16) -> bool {
        self.editor_area
            .is_some_and(|area| area.contains(Position::new(x, y)))
    }

    pub fn prompter_contains(&self, x: u16, y: u16) -> bool {
        self.prompter_area
            .is_some_and(|area| area.contains(Position::new(x, y)))
    }
}
