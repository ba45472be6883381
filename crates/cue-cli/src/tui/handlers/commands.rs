//! Control-surface actions
//!
//! Every operation a menu item or shortcut can trigger, with the guards the
//! coordination contract requires: empty-script play, destructive file ops
//! during playback, and unsaved-changes confirmation. A rejected operation
//! is a full no-op plus a warning toast.

use std::path::PathBuf;

use crate::tui::app::{App, PendingAction, Popup, View};
use crate::tui::components::Toast;
use crate::tui::popups::{PathAction, PathPrompt, SettingsForm};
use crate::tui::prompter::Prompter;
use cue_core::SettingsPatch;

impl App {
    fn engine_running(&self) -> bool {
        self.prompter
            .as_ref()
            .is_some_and(|p| !p.engine.is_paused())
    }

    /// Sync the script text from the editor before acting on it.
    fn sync_script(&mut self) {
        self.script.set_text(self.editor.content().to_string());
    }

    /// Play/pause. Opens the prompter on first use, pushing the current
    /// script snapshot and settings before starting.
    pub fn play_pause(&mut self) {
        self.pending_discard = None;
        self.sync_script();
        if self.script.is_blank() {
            self.show_toast(Toast::warning(
                "Script is empty - type or import text before playing",
            ));
            return;
        }

        if self.prompter.is_none() {
            self.prompter = Some(Prompter::new(
                self.script.text().to_string(),
                self.settings.clone(),
            ));
            self.view = View::Prompter;
            tracing::info!("opened prompter");
        }
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.engine.play_pause();
        }
    }

    /// Stop playback and rewind. Safe with no prompter open.
    pub fn stop(&mut self) {
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.engine.stop();
        }
    }

    /// Push the editor text into the prompter. Position rewinds, play state
    /// is untouched.
    pub fn update_prompter(&mut self) {
        self.sync_script();
        let text = self.script.text().to_string();
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.load_script(text);
        }
    }

    /// Relay the presentation toggle to the prompter.
    pub fn toggle_fullscreen(&mut self) {
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.toggle_fullscreen();
        }
    }

    /// Close the prompter window, stopping the engine first so no timer
    /// outlives it.
    pub fn close_prompter(&mut self) {
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.engine.stop();
        }
        if self.prompter.take().is_some() {
            self.view = View::Editor;
            tracing::info!("closed prompter");
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn open_settings(&mut self) {
        self.popup = Popup::Settings(SettingsForm::new(&self.settings));
    }

    /// Live settings update: applied to the control surface's copy and
    /// pushed to the open prompter without touching the play state.
    pub fn apply_settings_patch(&mut self, patch: SettingsPatch) {
        if patch.is_empty() {
            return;
        }
        self.settings.apply(patch.clone());
        if let Some(prompter) = self.prompter.as_mut() {
            prompter.apply_settings(patch);
        }
        tracing::info!(
            font = %self.settings.font_family,
            size = self.settings.font_size,
            speed = self.settings.scroll_speed,
            "settings applied"
        );
    }

    // =========================================================================
    // File operations
    // =========================================================================

    pub fn request_import(&mut self) {
        if self.engine_running() {
            self.show_toast(Toast::warning("Stop the prompter before importing a file"));
            return;
        }
        self.popup = Popup::Path(PathPrompt::new(PathAction::Import));
    }

    pub fn import_from(&mut self, path: PathBuf) {
        self.pending_discard = None;
        match self.script.import(path) {
            Ok(()) => {
                self.editor.set_content(self.script.text().to_string());
                let name = self.script.file_name().unwrap_or("file").to_string();
                self.show_toast(Toast::success(format!("Imported {name}")));
            }
            Err(err) => self.show_toast(Toast::error(err.to_string())),
        }
    }

    /// Save to the backing file, falling back to save-as for a fresh script.
    pub fn save(&mut self) {
        self.pending_discard = None;
        self.sync_script();
        if self.script.path().is_none() {
            self.request_save_as();
            return;
        }
        match self.script.save() {
            Ok(()) => {
                let name = self.script.file_name().unwrap_or("file").to_string();
                self.show_toast(Toast::success(format!("Saved {name}")));
            }
            Err(err) => self.show_toast(Toast::error(err.to_string())),
        }
    }

    pub fn request_save_as(&mut self) {
        let prefill = self
            .script
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.popup = Popup::Path(PathPrompt::with_input(PathAction::SaveAs, prefill));
    }

    pub fn save_as_to(&mut self, path: PathBuf) {
        self.sync_script();
        match self.script.save_as(path) {
            Ok(()) => {
                let name = self.script.file_name().unwrap_or("file").to_string();
                self.show_toast(Toast::success(format!("Saved {name}")));
            }
            Err(err) => self.show_toast(Toast::error(err.to_string())),
        }
    }

    pub fn close_file(&mut self) {
        if self.engine_running() {
            self.show_toast(Toast::warning("Stop the prompter before closing the file"));
            return;
        }
        self.sync_script();
        if self.script.is_modified() && !self.confirm_discard(PendingAction::CloseFile) {
            return;
        }
        self.script.close();
        self.editor.clear();
    }

    pub fn request_exit(&mut self) {
        if self.engine_running() {
            self.show_toast(Toast::warning("Stop the prompter before exiting"));
            return;
        }
        self.sync_script();
        if self.script.is_modified() && !self.confirm_discard(PendingAction::Exit) {
            return;
        }
        self.close_prompter();
        self.should_quit = true;
    }

    /// Double-press confirmation for discarding unsaved changes: the first
    /// request warns and remembers the action, repeating it confirms.
    fn confirm_discard(&mut self, action: PendingAction) -> bool {
        if self.pending_discard == Some(action) {
            self.pending_discard = None;
            return true;
        }
        self.pending_discard = Some(action);
        self.show_toast(Toast::warning("Unsaved changes - repeat the action to discard"));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app_with_script(text: &str) -> App {
        let mut app = App::new();
        app.editor.insert_str(text);
        app
    }

    #[test]
    fn test_play_with_blank_script_is_rejected() {
        let mut app = app_with_script("   \n\t");
        app.play_pause();
        assert!(app.prompter.is_none());
        assert_eq!(app.view, View::Editor);
        assert!(app.toasts.last_message().unwrap().contains("empty"));
    }

    #[test]
    fn test_play_opens_prompter_and_starts() {
        let mut app = app_with_script("some script text");
        app.play_pause();
        let prompter = app.prompter.as_ref().unwrap();
        assert!(!prompter.engine.is_paused());
        assert_eq!(app.view, View::Prompter);
        assert_eq!(prompter.settings(), &app.settings);
    }

    #[test]
    fn test_play_again_reuses_prompter_and_pauses() {
        let mut app = app_with_script("some script text");
        app.play_pause();
        app.play_pause();
        let prompter = app.prompter.as_ref().unwrap();
        assert!(prompter.engine.is_paused());
        assert!(!prompter.engine.is_finished());
    }

    #[test]
    fn test_file_ops_rejected_while_running() {
        let mut app = app_with_script("some script text");
        app.play_pause();

        app.request_import();
        assert!(app.popup.is_none());

        app.close_file();
        assert_eq!(app.editor.content(), "some script text");

        app.request_exit();
        assert!(!app.should_quit);
        assert!(app.prompter.is_some());
    }

    #[test]
    fn test_file_ops_permitted_while_paused() {
        let mut app = app_with_script("some script text");
        app.play_pause();
        app.play_pause(); // pause
        app.request_import();
        assert!(matches!(app.popup, Popup::Path(_)));
    }

    #[test]
    fn test_settings_push_does_not_touch_play_state() {
        let mut app = app_with_script("some script text");
        app.play_pause();
        app.apply_settings_patch(SettingsPatch {
            scroll_speed: Some(80),
            ..Default::default()
        });
        assert_eq!(app.settings.scroll_speed, 80);
        let prompter = app.prompter.as_ref().unwrap();
        assert_eq!(prompter.settings().scroll_speed, 80);
        assert!(!prompter.engine.is_paused());
    }

    #[test]
    fn test_settings_apply_with_no_prompter_open() {
        let mut app = App::new();
        app.apply_settings_patch(SettingsPatch {
            font_size: Some(72),
            ..Default::default()
        });
        assert_eq!(app.settings.font_size, 72);
    }

    #[test]
    fn test_close_prompter_stops_engine_first() {
        let mut app = app_with_script("some script text");
        app.play_pause();
        app.close_prompter();
        assert!(app.prompter.is_none());
        assert_eq!(app.view, View::Editor);
    }

    #[test]
    fn test_update_pushes_snapshot_without_altering_play_state() {
        let mut app = app_with_script("first version");
        app.play_pause();
        app.editor.insert_str(" plus more");
        app.update_prompter();
        let prompter = app.prompter.as_ref().unwrap();
        assert!(!prompter.engine.is_paused());
        assert_eq!(prompter.engine.scroll_position(), 0);
    }

    #[test]
    fn test_exit_with_unsaved_changes_needs_second_press() {
        let mut app = app_with_script("draft");
        app.request_exit();
        assert!(!app.should_quit);
        assert_eq!(app.pending_discard, Some(PendingAction::Exit));
        app.request_exit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_pending_discard_cleared_by_other_actions() {
        let mut app = app_with_script("draft");
        app.request_exit();
        assert_eq!(app.pending_discard, Some(PendingAction::Exit));
        app.play_pause();
        assert_eq!(app.pending_discard, None);
        // A later exit starts the confirmation over.
        app.play_pause(); // pause so exit is not blocked
        app.request_exit();
        assert!(!app.should_quit);
    }

    #[test]
    fn test_import_failure_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_script("current");
        app.import_from(dir.path().join("missing.txt"));
        assert_eq!(app.editor.content(), "current");
        assert!(app.toasts.last_message().unwrap().contains("failed to read"));
    }

    #[test]
    fn test_import_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.txt");
        std::fs::write(&path, "imported words").unwrap();

        let mut app = App::new();
        app.import_from(path.clone());
        assert_eq!(app.editor.content(), "imported words");
        assert!(!app.script.is_modified());

        app.editor.handle_key(KeyCode::End, KeyModifiers::NONE);
        app.editor.insert_str(" and edits");
        app.save();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "imported words and edits"
        );
    }

    #[test]
    fn test_stop_with_no_prompter_is_a_no_op() {
        let mut app = App::new();
        app.stop();
        app.close_prompter();
        assert!(app.prompter.is_none());
    }
}
