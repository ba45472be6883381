//! Keyboard event handlers
//!
//! Popup keys route first, then global shortcuts, then per-view handling.
//! Everything not claimed by a shortcut in the editor view goes to the
//! editor widget.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::app::{App, Popup, View};
use crate::tui::input::EditAction;
use crate::tui::popups::{FormAction, PathAction, PromptResult};

impl App {
    /// Main keyboard event dispatcher
    pub fn handle_key(&mut self, key: KeyEvent) {
        let is_press = key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat;
        if !is_press {
            return;
        }
        let code = key.code;
        let modifiers = key.modifiers;

        // Popups capture everything first
        if !self.popup.is_none() {
            self.handle_popup_key(code, modifiers);
            return;
        }

        // Global quit
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('q') {
            self.request_exit();
            return;
        }

        match self.view {
            View::Editor => self.handle_editor_key(code, modifiers),
            View::Prompter => self.handle_prompter_key(code),
        }
    }

    fn handle_popup_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let popup = std::mem::replace(&mut self.popup, Popup::None);
        match popup {
            Popup::Settings(mut form) => match form.handle_key(code, modifiers) {
                FormAction::Apply(patch) => self.apply_settings_patch(patch),
                FormAction::Cancel => {}
                FormAction::None => self.popup = Popup::Settings(form),
            },
            Popup::Path(mut prompt) => match prompt.handle_key(code, modifiers) {
                PromptResult::Submit(path) => match prompt.action {
                    PathAction::Import => self.import_from(path),
                    PathAction::SaveAs => self.save_as_to(path),
                },
                PromptResult::Cancel => {}
                PromptResult::None => self.popup = Popup::Path(prompt),
            },
            Popup::None => {}
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('p') => return self.play_pause(),
                KeyCode::Char('t') => return self.stop(),
                KeyCode::Char('u') => return self.update_prompter(),
                KeyCode::Char('o') => return self.request_import(),
                KeyCode::Char('s') => return self.save(),
                KeyCode::Char('n') => return self.close_file(),
                KeyCode::Char('w') => return self.close_prompter(),
                KeyCode::Char('f') => return self.toggle_fullscreen(),
                _ => return,
            }
        }
        if modifiers.contains(KeyModifiers::ALT) {
            match code {
                KeyCode::Char('s') => return self.request_save_as(),
                KeyCode::Char('z') => return self.editor.toggle_word_wrap(),
                _ => return,
            }
        }
        match code {
            KeyCode::F(2) => return self.open_settings(),
            KeyCode::F(3) => {
                // Jump to the prompter view without touching playback
                if self.prompter.is_some() {
                    self.view = View::Prompter;
                }
                return;
            }
            KeyCode::F(11) => return self.toggle_fullscreen(),
            _ => {}
        }

        if self.editor.handle_key(code, modifiers) == EditAction::Edited {
            self.pending_discard = None;
            self.script.set_text(self.editor.content().to_string());
        }
    }

    fn handle_prompter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') => self.play_pause(),
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('f') | KeyCode::F(11) => self.toggle_fullscreen(),
            KeyCode::Esc => {
                // Leave fullscreen first; a second Esc returns to the editor
                match self.prompter.as_mut() {
                    Some(prompter) if prompter.is_fullscreen() => prompter.toggle_fullscreen(),
                    _ => self.view = View::Editor,
                }
            }
            // Keyboard nudges share the drag path: clamped, play state
            // untouched
            KeyCode::Up => self.nudge(-1),
            KeyCode::Down => self.nudge(1),
            KeyCode::PageUp => self.nudge(-10),
            KeyCode::PageDown => self.nudge(10),
            _ => {}
        }
    }

    fn nudge(&mut self, delta: i32) {
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.engine.drag_by(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers));
    }

    #[test]
    fn test_typing_flows_into_editor_and_marks_modified() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('h'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(app.editor.content(), "hi");
        assert!(app.script.is_modified());
    }

    #[test]
    fn test_ctrl_p_starts_playback() {
        let mut app = App::new();
        app.editor.insert_str("script text");
        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert!(app.prompter.as_ref().is_some_and(|p| !p.engine.is_paused()));
    }

    #[test]
    fn test_space_in_prompter_view_toggles_pause() {
        let mut app = App::new();
        app.editor.insert_str("script text");
        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(app.prompter.as_ref().is_some_and(|p| p.engine.is_paused()));
    }

    #[test]
    fn test_esc_leaves_fullscreen_before_leaving_view() {
        let mut app = App::new();
        app.editor.insert_str("script text");
        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('f'), KeyModifiers::NONE);
        assert!(app.prompter.as_ref().unwrap().is_fullscreen());

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.prompter.as_ref().unwrap().is_fullscreen());
        assert_eq!(app.view, View::Prompter);

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.view, View::Editor);
    }

    #[test]
    fn test_settings_popup_round_trip() {
        let mut app = App::new();
        press(&mut app, KeyCode::F(2), KeyModifiers::NONE);
        assert!(matches!(app.popup, Popup::Settings(_)));

        // Move to scroll speed and raise it by ten, then apply.
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(app.popup.is_none());
        assert_eq!(app.settings.scroll_speed, 60);
    }

    #[test]
    fn test_popup_swallows_editor_keys() {
        let mut app = App::new();
        press(&mut app, KeyCode::F(2), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.editor.content(), "");
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = App::new();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert_eq!(app.editor.content(), "");
    }
}
