//! Path prompt popup - replaces the desktop file dialogs
//!
//! A single-line path input used for both import and save-as.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::common::{center_rect, popup_block, popup_title, render_popup_background};
use crate::tui::themes::Theme;

/// What the prompted path will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    Import,
    SaveAs,
}

impl PathAction {
    fn title(&self) -> &'static str {
        match self {
            PathAction::Import => "Import text file",
            PathAction::SaveAs => "Save as",
        }
    }
}

/// Outcome of a key press in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    None,
    Submit(PathBuf),
    Cancel,
}

pub struct PathPrompt {
    pub action: PathAction,
    input: String,
}

impl PathPrompt {
    pub fn new(action: PathAction) -> Self {
        Self {
            action,
            input: String::new(),
        }
    }

    /// Start with a prefilled path (save-as over the current file).
    pub fn with_input(action: PathAction, input: String) -> Self {
        Self { action, input }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> PromptResult {
        match code {
            KeyCode::Esc => PromptResult::Cancel,
            KeyCode::Enter => {
                let trimmed = self.input.trim();
                if trimmed.is_empty() {
                    PromptResult::None
                } else {
                    PromptResult::Submit(PathBuf::from(trimmed))
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                PromptResult::None
            }
            KeyCode::Char(ch) if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT => {
                self.input.push(ch);
                PromptResult::None
            }
            _ => PromptResult::None,
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let area = center_rect(60, 7, f.area());
        render_popup_background(f, area, theme);
        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines = vec![
            popup_title(self.action.title(), theme),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(theme.accent_color)),
                Span::styled(self.input.clone(), Style::default().fg(theme.text_color)),
                Span::styled("▏", Style::default().fg(theme.accent_color)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter confirm · Esc cancel",
                Style::default().fg(theme.dim_color),
            )),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_submit() {
        let mut prompt = PathPrompt::new(PathAction::Import);
        for ch in "/tmp/a.txt".chars() {
            prompt.handle_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
        assert_eq!(
            prompt.handle_key(KeyCode::Enter, KeyModifiers::NONE),
            PromptResult::Submit(PathBuf::from("/tmp/a.txt"))
        );
    }

    #[test]
    fn test_empty_submit_is_ignored() {
        let mut prompt = PathPrompt::new(PathAction::SaveAs);
        assert_eq!(
            prompt.handle_key(KeyCode::Enter, KeyModifiers::NONE),
            PromptResult::None
        );
        assert_eq!(
            prompt.handle_key(KeyCode::Esc, KeyModifiers::NONE),
            PromptResult::Cancel
        );
    }
}
