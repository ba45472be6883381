//! Toast notifications
//!
//! Short-lived messages in the top-right corner: warnings from rejected
//! operations (empty script, file ops during playback), I/O errors, and
//! save/import confirmations.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::tui::themes::Theme;

/// Maximum number of visible toasts
const MAX_VISIBLE_TOASTS: usize = 3;

/// Default toast duration
const DEFAULT_DURATION: Duration = Duration::from_secs(4);

const TOAST_HEIGHT: u16 = 3;
const TOAST_GAP: u16 = 1;
const TOAST_MAX_WIDTH: u16 = 54;

/// Kind of toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Positive confirmation (saved, imported)
    Success,
    /// Rejected operation, state unchanged
    Warning,
    /// I/O failure
    Error,
}

impl ToastKind {
    fn color(&self, theme: &Theme) -> Color {
        match self {
            ToastKind::Success => theme.success_color,
            ToastKind::Warning => theme.warning_color,
            ToastKind::Error => theme.error_color,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Warning => "!",
            ToastKind::Error => "✗",
        }
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= DEFAULT_DURATION
    }
}

/// Queue of toast notifications
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    /// Add a toast, dropping duplicates and the oldest entries past capacity.
    pub fn push(&mut self, toast: Toast) {
        if self.toasts.iter().any(|t| t.message == toast.message) {
            return;
        }
        while self.toasts.len() >= MAX_VISIBLE_TOASTS {
            self.toasts.remove(0);
        }
        self.toasts.push(toast);
    }

    /// Remove expired toasts, returns true if any were removed.
    pub fn tick(&mut self) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired());
        self.toasts.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Visible toasts, most recent first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(MAX_VISIBLE_TOASTS)
    }

    /// Most recent message, for tests.
    #[cfg(test)]
    pub fn last_message(&self) -> Option<&str> {
        self.toasts.last().map(|t| t.message.as_str())
    }
}

/// Render toasts in the top-right corner.
pub fn render_toasts(buf: &mut Buffer, area: Rect, queue: &ToastQueue, theme: &Theme) {
    if queue.is_empty() {
        return;
    }

    for (i, toast) in queue.visible().enumerate() {
        let width = (toast.message.width() as u16 + 7).min(TOAST_MAX_WIDTH);
        let x = area.width.saturating_sub(width + 2);
        let y = area.y + 1 + (i as u16 * (TOAST_HEIGHT + TOAST_GAP));
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }

        let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = toast.kind.color(theme);

        Clear.render(toast_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.bg_color));
        let inner = block.inner(toast_area);
        block.render(toast_area, buf);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", toast.kind.icon()), Style::default().fg(color)),
            Span::styled(
                toast.message.clone(),
                Style::default().fg(theme.text_color),
            ),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
