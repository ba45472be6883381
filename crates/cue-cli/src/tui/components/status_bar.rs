//! Status bar component - bottom bar with file, settings, and engine state

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::themes::Theme;
use cue_core::DisplaySettings;

/// Engine state summary for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineIndicator {
    Closed,
    Running,
    Paused,
    Finished,
}

impl EngineIndicator {
    fn text(&self) -> &'static str {
        match self {
            EngineIndicator::Closed => "no prompter",
            EngineIndicator::Running => "▶ playing",
            EngineIndicator::Paused => "⏸ paused",
            EngineIndicator::Finished => "■ finished",
        }
    }
}

/// Render the status bar at the bottom of the screen.
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    file_label: &str,
    word_wrap: bool,
    settings: &DisplaySettings,
    engine: EngineIndicator,
    elapsed: Option<String>,
) {
    let bg = Paragraph::new("").style(Style::default().bg(theme.status_bar_bg_color));
    f.render_widget(bg, area);

    let settings_text = format!(
        "{} {}pt · speed {}",
        settings.font_family, settings.font_size, settings.scroll_speed
    );
    let wrap_text = if word_wrap { "wrap" } else { "nowrap" };

    let mut left_spans = vec![
        Span::raw(" "),
        Span::styled(file_label.to_string(), Style::default().fg(theme.dim_color)),
        Span::styled(" │ ", Style::default().fg(theme.dim_color)),
        Span::styled(wrap_text, Style::default().fg(theme.dim_color)),
        Span::styled(" │ ", Style::default().fg(theme.dim_color)),
        Span::styled(settings_text.clone(), Style::default().fg(theme.dim_color)),
    ];
    let mut left_width: u16 =
        1 + file_label.width() as u16 + 3 + wrap_text.width() as u16 + 3 + settings_text.width() as u16;

    let engine_color = match engine {
        EngineIndicator::Running => theme.success_color,
        EngineIndicator::Finished => theme.warning_color,
        _ => theme.dim_color,
    };
    left_spans.push(Span::styled(" │ ", Style::default().fg(theme.dim_color)));
    left_spans.push(Span::styled(
        engine.text(),
        Style::default().fg(engine_color),
    ));
    left_width += 3 + engine.text().width() as u16;

    if let Some(elapsed) = elapsed {
        left_spans.push(Span::styled(" │ ", Style::default().fg(theme.dim_color)));
        left_width += 3 + elapsed.width() as u16;
        left_spans.push(Span::styled(elapsed, Style::default().fg(theme.accent_color)));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(left_width), Constraint::Fill(1)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);

    let hints = Paragraph::new(Line::from(Span::styled(
        "^P play · ^T stop · ^U update · F2 settings · ^Q quit ",
        Style::default().fg(theme.dim_color),
    )))
    .alignment(Alignment::Right);
    f.render_widget(hints, chunks[1]);
}
