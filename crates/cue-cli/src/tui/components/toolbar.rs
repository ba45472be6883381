//! Toolbar component - top bar with document title and dirty marker

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::themes::Theme;

/// Render the toolbar at the top of the screen.
///
/// Shows `*name - Cue` while the script has unsaved changes, matching the
/// window-title convention of desktop editors.
pub fn render_toolbar(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    file_name: Option<&str>,
    modified: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_color))
        .style(Style::default().bg(theme.bg_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let star = if modified { "*" } else { "" };
    let title = match file_name {
        Some(name) => format!("{star}{name} - Cue"),
        None => format!("{star}Cue"),
    };

    let line = Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(theme.title_color)
            .add_modifier(Modifier::BOLD),
    )]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
}
