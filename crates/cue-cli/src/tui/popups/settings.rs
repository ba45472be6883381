//! Settings form popup
//!
//! Edits font family, font size, and scroll speed. Apply produces a patch
//! containing only the fields that actually changed, so unspecified fields
//! keep their previous values downstream.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::common::{center_rect, popup_block, popup_title, render_popup_background};
use crate::tui::themes::Theme;
use cue_core::settings::{
    DisplaySettings, SettingsPatch, FONT_SIZE_MAX, FONT_SIZE_MIN, SCROLL_SPEED_MAX,
    SCROLL_SPEED_MIN,
};

const FIELD_COUNT: usize = 3;

/// Outcome of a key press in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    /// Apply the given changes and close.
    Apply(SettingsPatch),
    Cancel,
}

pub struct SettingsForm {
    initial: DisplaySettings,
    font_family: String,
    font_size: u16,
    scroll_speed: u16,
    selected: usize,
}

impl SettingsForm {
    pub fn new(current: &DisplaySettings) -> Self {
        Self {
            initial: current.clone(),
            font_family: current.font_family.clone(),
            font_size: current.font_size,
            scroll_speed: current.scroll_speed,
            selected: 0,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> FormAction {
        let step: i32 = if modifiers.contains(KeyModifiers::SHIFT) {
            10
        } else {
            1
        };
        match code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Apply(self.patch()),
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = (self.selected + FIELD_COUNT - 1) % FIELD_COUNT;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.selected = (self.selected + 1) % FIELD_COUNT;
            }
            KeyCode::Left => self.adjust(-step),
            KeyCode::Right => self.adjust(step),
            KeyCode::Char(ch) if self.selected == 0 => {
                self.font_family.push(ch);
            }
            KeyCode::Backspace if self.selected == 0 => {
                self.font_family.pop();
            }
            _ => {}
        }
        FormAction::None
    }

    fn adjust(&mut self, delta: i32) {
        match self.selected {
            1 => {
                self.font_size = clamp_i32(
                    i32::from(self.font_size) + delta,
                    FONT_SIZE_MIN,
                    FONT_SIZE_MAX,
                );
            }
            2 => {
                self.scroll_speed = clamp_i32(
                    i32::from(self.scroll_speed) + delta,
                    SCROLL_SPEED_MIN,
                    SCROLL_SPEED_MAX,
                );
            }
            _ => {}
        }
    }

    /// Only the fields that differ from the values the form opened with.
    fn patch(&self) -> SettingsPatch {
        SettingsPatch {
            font_family: (self.font_family != self.initial.font_family)
                .then(|| self.font_family.clone()),
            font_size: (self.font_size != self.initial.font_size).then_some(self.font_size),
            scroll_speed: (self.scroll_speed != self.initial.scroll_speed)
                .then_some(self.scroll_speed),
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let area = center_rect(44, 11, f.area());
        render_popup_background(f, area, theme);
        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let selected_style = Style::default()
            .fg(theme.accent_color)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(theme.dim_color);
        let value_style = Style::default().fg(theme.text_color);

        let field = |idx: usize, label: &str, value: String| -> Line<'static> {
            let marker = if self.selected == idx { "▸ " } else { "  " };
            Line::from(vec![
                Span::styled(
                    marker.to_string(),
                    if self.selected == idx {
                        selected_style
                    } else {
                        label_style
                    },
                ),
                Span::styled(format!("{label:<14}"), label_style),
                Span::styled(
                    value,
                    if self.selected == idx {
                        selected_style
                    } else {
                        value_style
                    },
                ),
            ])
        };

        let lines = vec![
            popup_title("Settings", theme),
            Line::from(""),
            field(0, "Font", self.font_family.clone()),
            field(1, "Font size", format!("{} pt", self.font_size)),
            field(2, "Scroll speed", self.scroll_speed.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "←/→ adjust · type to edit font · Enter apply · Esc cancel",
                label_style,
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Left),
            inner,
        );
    }
}

fn clamp_i32(value: i32, min: u16, max: u16) -> u16 {
    value.clamp(i32::from(min), i32::from(max)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_reports_only_changed_fields() {
        let settings = DisplaySettings {
            font_family: "Arial".to_string(),
            font_size: 48,
            scroll_speed: 50,
        };
        let mut form = SettingsForm::new(&settings);
        form.handle_key(KeyCode::Down, KeyModifiers::NONE); // font size
        form.handle_key(KeyCode::Right, KeyModifiers::NONE);

        let FormAction::Apply(patch) = form.handle_key(KeyCode::Enter, KeyModifiers::NONE) else {
            panic!("expected apply");
        };
        assert_eq!(patch.font_family, None);
        assert_eq!(patch.font_size, Some(49));
        assert_eq!(patch.scroll_speed, None);
    }

    #[test]
    fn test_adjust_clamps_at_bounds() {
        let settings = DisplaySettings {
            scroll_speed: SCROLL_SPEED_MAX,
            ..Default::default()
        };
        let mut form = SettingsForm::new(&settings);
        form.selected = 2;
        form.handle_key(KeyCode::Right, KeyModifiers::SHIFT);
        let FormAction::Apply(patch) = form.handle_key(KeyCode::Enter, KeyModifiers::NONE) else {
            panic!("expected apply");
        };
        // Already at the max: nothing changed, nothing reported.
        assert!(patch.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut form = SettingsForm::new(&DisplaySettings::default());
        assert_eq!(
            form.handle_key(KeyCode::Esc, KeyModifiers::NONE),
            FormAction::Cancel
        );
    }
}
