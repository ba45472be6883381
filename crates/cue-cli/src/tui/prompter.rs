//! Prompter - the display surface
//!
//! Owns the scroll engine, the pushed script snapshot, and the wrapped-row
//! layout derived from the display settings. Arbitrates between automatic
//! ticks and pointer drags: both go through the engine's clamped position,
//! serialized by event dispatch, last writer wins.

use cue_core::{DisplaySettings, ScrollEngine, SettingsPatch};

/// Cell rows one text line occupies per 24pt of font size.
const POINTS_PER_ROW: u16 = 24;

pub struct Prompter {
    pub engine: ScrollEngine,
    settings: DisplaySettings,
    text: String,
    /// Wrapped buffer rows at the current viewport/settings. Spacing rows
    /// inserted by the zoom factor are empty strings.
    rows: Vec<String>,
    /// Text-area size (columns, rows) of the last layout.
    viewport: (u16, u16),
    fullscreen: bool,
    /// Last pointer row while a drag is in progress.
    drag_row: Option<u16>,
}

impl Prompter {
    /// Create the surface with a script snapshot and the current settings.
    /// Layout is deferred until the first [`resize`](Self::resize) reports
    /// the text-area size.
    pub fn new(text: String, settings: DisplaySettings) -> Self {
        Self {
            engine: ScrollEngine::new(settings.scroll_speed),
            settings,
            text,
            rows: Vec::new(),
            viewport: (0, 0),
            fullscreen: false,
            drag_row: None,
        }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// How many buffer rows one text line occupies at the current font size.
    pub fn zoom(&self) -> usize {
        (self.settings.font_size / POINTS_PER_ROW).max(1) as usize
    }

    /// Replace the script snapshot: re-layout and rewind to the start
    /// without altering the play state.
    pub fn load_script(&mut self, text: String) {
        self.text = text;
        self.relayout();
        self.engine.reset_position();
    }

    /// Live settings update. Speed changes only re-derive the tick interval;
    /// font changes re-layout, keeping the numeric position (clamped).
    pub fn apply_settings(&mut self, patch: SettingsPatch) {
        let relayout = patch.changes_layout();
        self.settings.apply(patch);
        self.engine.set_speed(self.settings.scroll_speed);
        if relayout {
            self.relayout();
        }
    }

    /// Record the text-area size; re-layouts only when it changed.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.viewport != (width, height) {
            self.viewport = (width, height);
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        let (width, height) = self.viewport;
        if width == 0 {
            return;
        }
        let zoom = self.zoom();
        let wrap_width = (width as usize / zoom).max(1);

        let mut rows = Vec::new();
        for line in self.text.split('\n') {
            for piece in textwrap::wrap(line, wrap_width) {
                rows.push(piece.into_owned());
                for _ in 1..zoom {
                    rows.push(String::new());
                }
            }
        }
        self.rows = rows;
        self.engine
            .set_max_scroll(self.rows.len().saturating_sub(height as usize));
    }

    /// Rows visible at the current scroll position.
    pub fn visible_rows(&self) -> &[String] {
        let start = self.engine.scroll_position().min(self.rows.len());
        let end = (start + self.viewport.1 as usize).min(self.rows.len());
        &self.rows[start..end]
    }

    // =========================================================================
    // Drag mode
    // =========================================================================

    pub fn drag_start(&mut self, row: u16) {
        self.drag_row = Some(row);
    }

    /// Incremental drag: apply the delta since the last recorded row, then
    /// record the current one. Content follows the pointer, so moving down
    /// scrolls toward the start.
    pub fn drag_move(&mut self, row: u16) {
        if let Some(last) = self.drag_row {
            let delta = i32::from(last) - i32::from(row);
            if delta != 0 {
                self.engine.drag_by(delta);
            }
        }
        self.drag_row = Some(row);
    }

    pub fn drag_end(&mut self) {
        self.drag_row = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_row.is_some()
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Alternate between normal and fullscreen presentation. No effect on
    /// scroll state.
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter_with_lines(n: usize, width: u16, height: u16) -> Prompter {
        let text = (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let settings = DisplaySettings {
            font_size: 12, // zoom 1
            ..Default::default()
        };
        let mut prompter = Prompter::new(text, settings);
        prompter.resize(width, height);
        prompter
    }

    #[test]
    fn test_max_scroll_is_rows_minus_viewport() {
        let prompter = prompter_with_lines(30, 40, 10);
        assert_eq!(prompter.engine.max_scroll(), 20);
    }

    #[test]
    fn test_short_document_has_no_scroll_extent() {
        let prompter = prompter_with_lines(5, 40, 10);
        assert_eq!(prompter.engine.max_scroll(), 0);
    }

    #[test]
    fn test_zoom_scales_rows_and_wrap_width() {
        let settings = DisplaySettings {
            font_size: 48, // zoom 2
            ..Default::default()
        };
        let mut prompter = Prompter::new("one\ntwo".to_string(), settings);
        prompter.resize(40, 4);
        // Two lines, each followed by one spacing row.
        assert_eq!(prompter.rows.len(), 4);
        assert_eq!(prompter.rows[1], "");
    }

    #[test]
    fn test_font_change_relayouts_and_clamps_position() {
        let mut prompter = prompter_with_lines(30, 40, 10);
        prompter.engine.drag_by(20);
        assert_eq!(prompter.engine.scroll_position(), 20);

        // Bigger font halves the viewport capacity and grows the row count;
        // the numeric position survives, clamped to the new extent.
        prompter.apply_settings(SettingsPatch {
            font_size: Some(48),
            ..Default::default()
        });
        let max = prompter.engine.max_scroll();
        assert_eq!(max, 60 - 10);
        assert_eq!(prompter.engine.scroll_position(), 20);
    }

    #[test]
    fn test_speed_change_does_not_relayout_or_move() {
        let mut prompter = prompter_with_lines(30, 40, 10);
        prompter.engine.drag_by(7);
        prompter.apply_settings(SettingsPatch {
            scroll_speed: Some(120),
            ..Default::default()
        });
        assert_eq!(prompter.engine.scroll_position(), 7);
        assert_eq!(prompter.engine.scroll_speed(), 120);
    }

    #[test]
    fn test_load_script_rewinds_without_pausing() {
        let mut prompter = prompter_with_lines(30, 40, 10);
        prompter.engine.play_pause();
        prompter.engine.drag_by(10);
        prompter.load_script("fresh text".to_string());
        assert_eq!(prompter.engine.scroll_position(), 0);
        assert!(!prompter.engine.is_paused());
    }

    #[test]
    fn test_drag_deltas_are_incremental() {
        let mut prompter = prompter_with_lines(40, 40, 10);
        prompter.engine.drag_by(15);

        prompter.drag_start(20);
        prompter.drag_move(18); // pointer up 2 -> scroll down 2
        assert_eq!(prompter.engine.scroll_position(), 17);
        prompter.drag_move(19); // pointer down 1 -> scroll up 1
        assert_eq!(prompter.engine.scroll_position(), 16);
        prompter.drag_end();
        assert!(!prompter.is_dragging());
    }

    #[test]
    fn test_drag_does_not_touch_play_state() {
        let mut prompter = prompter_with_lines(40, 40, 10);
        prompter.engine.play_pause();
        prompter.drag_start(5);
        prompter.drag_move(8);
        assert!(!prompter.engine.is_paused());
    }

    #[test]
    fn test_fullscreen_toggle_is_presentation_only() {
        let mut prompter = prompter_with_lines(30, 40, 10);
        prompter.engine.drag_by(5);
        assert!(!prompter.is_fullscreen());
        prompter.toggle_fullscreen();
        assert!(prompter.is_fullscreen());
        prompter.toggle_fullscreen();
        assert!(!prompter.is_fullscreen());
        assert_eq!(prompter.engine.scroll_position(), 5);
    }

    #[test]
    fn test_visible_rows_window() {
        let mut prompter = prompter_with_lines(30, 40, 10);
        prompter.engine.drag_by(3);
        let rows = prompter.visible_rows();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], "line 3");
    }
}
