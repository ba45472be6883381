//! Mouse event handling
//!
//! Wheel scrolling for both views plus the prompter's press/drag/release
//! cycle. Drag deltas go through the engine's clamped position, so neither
//! writer needs bounds checks of its own.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, View};

/// Rows moved per wheel notch.
const WHEEL_STEP: i32 = 3;

impl App {
    /// Handle mouse events for scrolling, clicking, and dragging
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        // Popups are keyboard-driven; ignore the mouse while one is open
        if !self.popup.is_none() {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.handle_scroll(mouse.column, mouse.row, -WHEEL_STEP),
            MouseEventKind::ScrollDown => self.handle_scroll(mouse.column, mouse.row, WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_left_click(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.handle_drag(mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.handle_mouse_up(),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, x: u16, y: u16, delta: i32) {
        match self.view {
            View::Prompter => {
                if self.layout.prompter_contains(x, y) {
                    if let Some(prompter) = self.prompter.as_mut() {
                        prompter.engine.drag_by(delta);
                    }
                }
            }
            View::Editor => {
                if self.layout.editor_contains(x, y) {
                    if delta < 0 {
                        self.editor.scroll_up();
                    } else {
                        self.editor.scroll_down();
                    }
                }
            }
        }
    }

    fn handle_left_click(&mut self, x: u16, y: u16) {
        match self.view {
            View::Prompter => {
                if self.layout.prompter_contains(x, y) {
                    if let Some(prompter) = self.prompter.as_mut() {
                        prompter.drag_start(y);
                    }
                }
            }
            View::Editor => {
                if let Some(area) = self.layout.editor_area {
                    if self.layout.editor_contains(x, y) {
                        let text_x = x.saturating_sub(area.x + self.editor.gutter_width());
                        let text_y = y.saturating_sub(area.y);
                        self.editor.handle_click(text_x, text_y);
                    }
                }
            }
        }
    }

    fn handle_drag(&mut self, y: u16) {
        if self.view != View::Prompter {
            return;
        }
        if let Some(prompter) = self.prompter.as_mut() {
            if prompter.is_dragging() {
                prompter.drag_move(y);
            }
        }
    }

    fn handle_mouse_up(&mut self) {
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.drag_end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn prompter_app() -> App {
        let mut app = App::new();
        let text = (0..40).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        app.editor.insert_str(&text);
        app.play_pause();
        // Simulate one rendered frame: a 40x10 text area at the origin.
        app.layout.prompter_area = Some(Rect::new(0, 0, 40, 10));
        if let Some(prompter) = app.prompter.as_mut() {
            prompter.resize(40, 10);
        }
        app
    }

    #[test]
    fn test_press_drag_release_cycle() {
        let mut app = prompter_app();
        app.prompter.as_mut().unwrap().engine.drag_by(10);

        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 8));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6));
        let prompter = app.prompter.as_ref().unwrap();
        assert_eq!(prompter.engine.scroll_position(), 12);
        assert!(!prompter.engine.is_paused());

        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 6));
        assert!(!app.prompter.as_ref().unwrap().is_dragging());
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut app = prompter_app();
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6));
        assert_eq!(app.prompter.as_ref().unwrap().engine.scroll_position(), 0);
    }

    #[test]
    fn test_press_outside_text_area_does_not_start_drag() {
        let mut app = prompter_app();
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 60, 20));
        assert!(!app.prompter.as_ref().unwrap().is_dragging());
    }

    #[test]
    fn test_wheel_scrolls_clamped() {
        let mut app = prompter_app();
        app.handle_mouse_event(mouse(MouseEventKind::ScrollUp, 5, 5));
        assert_eq!(app.prompter.as_ref().unwrap().engine.scroll_position(), 0);
        app.handle_mouse_event(mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(app.prompter.as_ref().unwrap().engine.scroll_position(), 3);
    }
}
