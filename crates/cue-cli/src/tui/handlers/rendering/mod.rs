//! UI rendering coordinator
//!
//! Main entry point that dispatches to the per-view render functions.

mod views;

use ratatui::{style::Style, widgets::Block, Frame};

use crate::tui::app::{App, Popup, View};
use crate::tui::components::render_toasts;

impl App {
    /// Main UI rendering dispatcher
    pub fn ui(&mut self, f: &mut Frame) {
        // Background
        let bg = Block::default().style(Style::default().bg(self.theme.bg_color));
        f.render_widget(bg, f.area());

        match self.view {
            View::Editor => self.render_editor(f),
            View::Prompter => self.render_prompter(f),
        }

        // Popup on top
        match &self.popup {
            Popup::None => {}
            Popup::Settings(form) => form.render(f, &self.theme),
            Popup::Path(prompt) => prompt.render(f, &self.theme),
        }

        // Toasts on top of everything
        let area = f.area();
        render_toasts(f.buffer_mut(), area, &self.toasts, &self.theme);
    }
}
