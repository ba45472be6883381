//! View rendering
//!
//! Renders the editor (control) view and the prompter (display) view, and
//! records the drawn areas for mouse hit testing.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::components::{render_status_bar, render_toolbar, EngineIndicator};

impl App {
    /// Render the editor view: toolbar, gutter editor, status bar.
    pub fn render_editor(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Toolbar
                Constraint::Min(3),    // Editor
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        render_toolbar(
            f,
            chunks[0],
            &self.theme,
            self.script.file_name(),
            self.script.is_modified(),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border_color))
            .style(Style::default().bg(self.theme.bg_color));
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        self.layout.editor_area = Some(inner);
        let gutter = self.editor.gutter_width();
        self.editor
            .set_viewport(inner.width.saturating_sub(gutter), inner.height);
        self.editor.render(f, inner, &self.theme, self.popup.is_none());

        let (indicator, elapsed) = match self.prompter.as_ref() {
            None => (EngineIndicator::Closed, None),
            Some(p) if !p.engine.is_paused() => {
                (EngineIndicator::Running, Some(p.engine.elapsed_label()))
            }
            Some(p) if p.engine.is_finished() => {
                (EngineIndicator::Finished, Some(p.engine.elapsed_label()))
            }
            Some(p) => (EngineIndicator::Paused, Some(p.engine.elapsed_label())),
        };
        let file_label = self.script.file_name().unwrap_or("untitled").to_string();
        render_status_bar(
            f,
            chunks[2],
            &self.theme,
            &file_label,
            self.editor.word_wrap(),
            &self.settings,
            indicator,
            elapsed,
        );
    }

    /// Render the prompter view. Fullscreen drops all chrome and gives the
    /// whole terminal to the text.
    pub fn render_prompter(&mut self, f: &mut Frame) {
        let area = f.area();
        let Some(prompter) = self.prompter.as_mut() else {
            self.layout.prompter_area = None;
            return;
        };

        let text_area = if prompter.is_fullscreen() {
            area
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // State line
                    Constraint::Min(3),    // Text
                    Constraint::Length(1), // Key hints
                ])
                .split(area);

            let engine = &prompter.engine;
            let (state_text, state_color) = if !engine.is_paused() {
                ("▶ PLAYING", self.theme.success_color)
            } else if engine.is_finished() {
                ("■ FINISHED", self.theme.warning_color)
            } else {
                ("⏸ PAUSED", self.theme.dim_color)
            };
            let sep = Span::styled(" │ ", Style::default().fg(self.theme.dim_color));
            let settings = prompter.settings();
            let header = Line::from(vec![
                Span::styled(
                    format!(" {state_text}"),
                    Style::default()
                        .fg(state_color)
                        .add_modifier(Modifier::BOLD),
                ),
                sep.clone(),
                Span::styled(
                    engine.elapsed_label(),
                    Style::default().fg(self.theme.accent_color),
                ),
                sep.clone(),
                Span::styled(
                    format!("{:3.0}%", engine.progress() * 100.0),
                    Style::default().fg(self.theme.dim_color),
                ),
                sep,
                Span::styled(
                    format!(
                        "{} {}pt · speed {}",
                        settings.font_family, settings.font_size, settings.scroll_speed
                    ),
                    Style::default().fg(self.theme.dim_color),
                ),
            ]);
            f.render_widget(Paragraph::new(header), chunks[0]);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.border_color))
                .style(Style::default().bg(self.theme.bg_color));
            let inner = block.inner(chunks[1]);
            f.render_widget(block, chunks[1]);

            let hints = Paragraph::new(Line::from(Span::styled(
                "space play/pause · s stop · f fullscreen · drag/wheel scroll · esc editor",
                Style::default().fg(self.theme.dim_color),
            )))
            .alignment(Alignment::Center);
            f.render_widget(hints, chunks[2]);

            inner
        };

        self.layout.prompter_area = Some(text_area);
        prompter.resize(text_area.width, text_area.height);

        let style = Style::default()
            .fg(self.theme.text_color)
            .add_modifier(Modifier::BOLD);
        for (i, row) in prompter.visible_rows().iter().enumerate() {
            if i as u16 >= text_area.height {
                break;
            }
            let row_area = Rect::new(text_area.x, text_area.y + i as u16, text_area.width, 1);
            f.render_widget(Paragraph::new(Span::styled(row.clone(), style)), row_area);
        }
    }
}
