//! Multi-line script editor with a line-number gutter
//!
//! Plain-text editing only: cursor movement, insertion, deletion, word wrap,
//! and a viewport over the wrapped rows. Wrapping is computed as byte ranges
//! into each logical line so cursor math stays exact.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::themes::Theme;

/// What a key press did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Content changed.
    Edited,
    /// Cursor/viewport moved or nothing happened.
    None,
}

/// One wrapped visual row: which logical line it belongs to and the byte
/// range of that line it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VisualRow {
    line_idx: usize,
    range: Range<usize>,
    first: bool,
}

/// Multi-line editor state.
pub struct ScriptEditor {
    content: String,
    /// Cursor as a byte offset into `content`, always on a char boundary.
    cursor: usize,
    /// Wrap width in display columns.
    width: u16,
    /// Visible rows in the text area.
    height: u16,
    /// First visible visual row.
    viewport_offset: usize,
    word_wrap: bool,
    /// Column memory for vertical movement.
    desired_col: Option<usize>,
}

impl ScriptEditor {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            width: 80,
            height: 24,
            viewport_offset: 0,
            word_wrap: true,
            desired_col: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor = 0;
        self.viewport_offset = 0;
        self.desired_col = None;
    }

    pub fn clear(&mut self) {
        self.set_content(String::new());
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn toggle_word_wrap(&mut self) {
        self.word_wrap = !self.word_wrap;
        self.viewport_offset = 0;
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        let width = width.max(10);
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height.max(1);
            self.ensure_cursor_visible();
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> EditAction {
        match code {
            KeyCode::Char(ch)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                self.insert_char(ch);
                EditAction::Edited
            }
            KeyCode::Enter => {
                self.insert_char('\n');
                EditAction::Edited
            }
            KeyCode::Tab => {
                self.insert_str("    ");
                EditAction::Edited
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_boundary(&self.content, self.cursor);
                    self.content.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                    self.after_edit();
                    EditAction::Edited
                } else {
                    EditAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.content.len() {
                    let next = next_boundary(&self.content, self.cursor);
                    self.content.replace_range(self.cursor..next, "");
                    self.after_edit();
                    EditAction::Edited
                } else {
                    EditAction::None
                }
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor = prev_boundary(&self.content, self.cursor);
                }
                self.after_move();
                EditAction::None
            }
            KeyCode::Right => {
                if self.cursor < self.content.len() {
                    self.cursor = next_boundary(&self.content, self.cursor);
                }
                self.after_move();
                EditAction::None
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                EditAction::None
            }
            KeyCode::Down => {
                self.move_vertical(1);
                EditAction::None
            }
            KeyCode::Home => {
                let (start, _) = self.current_line_bounds();
                self.cursor = start;
                self.after_move();
                EditAction::None
            }
            KeyCode::End => {
                let (_, end) = self.current_line_bounds();
                self.cursor = end;
                self.after_move();
                EditAction::None
            }
            KeyCode::PageUp => {
                self.viewport_offset = self.viewport_offset.saturating_sub(self.height as usize);
                EditAction::None
            }
            KeyCode::PageDown => {
                let max = self.max_viewport_offset();
                self.viewport_offset =
                    (self.viewport_offset + self.height as usize).min(max);
                EditAction::None
            }
            _ => EditAction::None,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.after_edit();
    }

    pub fn insert_str(&mut self, text: &str) {
        self.content.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.desired_col = None;
        self.ensure_cursor_visible();
    }

    fn after_move(&mut self) {
        self.desired_col = None;
        self.ensure_cursor_visible();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn lines(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Byte bounds of the logical line containing the cursor.
    fn current_line_bounds(&self) -> (usize, usize) {
        let start = self.content[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let end = self.content[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.content.len());
        (start, end)
    }

    /// Logical line index and byte offset within that line for the cursor.
    fn cursor_line_col(&self) -> (usize, usize) {
        let line_idx = self.content[..self.cursor].matches('\n').count();
        let (start, _) = self.current_line_bounds();
        (line_idx, self.cursor - start)
    }

    /// All wrapped visual rows for the current width and wrap mode.
    fn visual_rows(&self) -> Vec<VisualRow> {
        let width = self.width as usize;
        let mut rows = Vec::new();
        for (line_idx, line) in self.lines().iter().enumerate() {
            let ranges = if self.word_wrap {
                wrap_ranges(line, width)
            } else {
                vec![0..line.len()]
            };
            for (i, range) in ranges.into_iter().enumerate() {
                rows.push(VisualRow {
                    line_idx,
                    range,
                    first: i == 0,
                });
            }
        }
        rows
    }

    pub fn visual_row_count(&self) -> usize {
        self.visual_rows().len()
    }

    fn max_viewport_offset(&self) -> usize {
        self.visual_row_count().saturating_sub(self.height as usize)
    }

    /// Visual (row, col) of the cursor within the wrapped rows.
    fn cursor_visual(&self) -> (usize, usize) {
        let (line_idx, byte_in_line) = self.cursor_line_col();
        let rows = self.visual_rows();
        let lines = self.lines();
        let mut last_of_line = 0;
        for (row_idx, row) in rows.iter().enumerate() {
            if row.line_idx != line_idx {
                continue;
            }
            last_of_line = row_idx;
            if byte_in_line < row.range.end
                || (byte_in_line == row.range.end && row.range.end == lines[line_idx].len())
            {
                let col = lines[line_idx][row.range.start..byte_in_line.max(row.range.start)]
                    .width();
                return (row_idx, col);
            }
        }
        // Cursor past the last wrapped segment (trailing whitespace trimmed
        // at a break): pin it to the end of the line's final row.
        let row = &rows[last_of_line];
        let col = lines[line_idx][row.range.clone()].width();
        (last_of_line, col)
    }

    fn ensure_cursor_visible(&mut self) {
        let (row, _) = self.cursor_visual();
        let height = self.height as usize;
        if row < self.viewport_offset {
            self.viewport_offset = row;
        } else if row >= self.viewport_offset + height {
            self.viewport_offset = row + 1 - height;
        }
        self.viewport_offset = self.viewport_offset.min(self.max_viewport_offset());
    }

    fn move_vertical(&mut self, delta: isize) {
        let (row, col) = self.cursor_visual();
        let desired = *self.desired_col.get_or_insert(col);
        let rows = self.visual_rows();
        let target = row as isize + delta;
        if target < 0 || target as usize >= rows.len() {
            return;
        }
        let target_row = &rows[target as usize];
        let lines = self.lines();
        let segment = &lines[target_row.line_idx][target_row.range.clone()];

        // Walk to the desired column by display width.
        let mut byte_in_segment = 0;
        let mut width_so_far = 0;
        for ch in segment.chars() {
            let w = ch.width().unwrap_or(1);
            if width_so_far + w > desired {
                break;
            }
            width_so_far += w;
            byte_in_segment += ch.len_utf8();
        }

        let line_start = line_start_offset(&self.content, target_row.line_idx);
        self.cursor = line_start + target_row.range.start + byte_in_segment;
        self.desired_col = Some(desired);
        self.ensure_cursor_visible();
    }

    // =========================================================================
    // Mouse
    // =========================================================================

    /// Move the cursor to the clicked cell (coordinates relative to the text
    /// area).
    pub fn handle_click(&mut self, x: u16, y: u16) {
        let rows = self.visual_rows();
        let row_idx = (self.viewport_offset + y as usize).min(rows.len().saturating_sub(1));
        let Some(row) = rows.get(row_idx) else {
            return;
        };
        let lines = self.lines();
        let segment = &lines[row.line_idx][row.range.clone()];

        let mut byte_in_segment = 0;
        let mut width_so_far = 0;
        for ch in segment.chars() {
            let w = ch.width().unwrap_or(1);
            if width_so_far + w > x as usize {
                break;
            }
            width_so_far += w;
            byte_in_segment += ch.len_utf8();
        }

        let line_start = line_start_offset(&self.content, row.line_idx);
        self.cursor = line_start + row.range.start + byte_in_segment;
        self.desired_col = None;
    }

    pub fn scroll_up(&mut self) {
        self.viewport_offset = self.viewport_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.viewport_offset = (self.viewport_offset + 1).min(self.max_viewport_offset());
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Width of the line-number gutter, including its trailing separator.
    pub fn gutter_width(&self) -> u16 {
        let digits = self.line_count().to_string().len().max(2);
        digits as u16 + 3
    }

    /// Render the gutter and wrapped text into `area`, placing the terminal
    /// cursor when `focused`.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let gutter = self.gutter_width();
        let digits = (gutter - 3) as usize;
        let rows = self.visual_rows();
        let (cursor_row, cursor_col) = self.cursor_visual();
        let (cursor_line, _) = self.cursor_line_col();
        let lines = self.lines();

        for y in 0..area.height {
            let row_idx = self.viewport_offset + y as usize;
            let Some(row) = rows.get(row_idx) else { break };
            let segment = &lines[row.line_idx][row.range.clone()];

            let number = if row.first {
                format!("{:>digits$} ", row.line_idx + 1)
            } else {
                " ".repeat(digits + 1)
            };
            let on_cursor_line = row.line_idx == cursor_line;
            let gutter_style = if on_cursor_line {
                Style::default()
                    .fg(theme.accent_color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.gutter_color)
            };
            let text_style = if on_cursor_line {
                Style::default()
                    .fg(theme.text_color)
                    .bg(theme.highlight_bg_color)
            } else {
                Style::default().fg(theme.text_color)
            };

            let mut shown = segment.to_string();
            if !self.word_wrap {
                shown = truncate_to_width(&shown, self.width as usize);
            }
            // Pad the highlighted line to the full width.
            if on_cursor_line {
                let pad = (self.width as usize).saturating_sub(shown.width());
                shown.push_str(&" ".repeat(pad));
            }

            let line = Line::from(vec![
                Span::styled(number, gutter_style),
                Span::raw("│ "),
                Span::styled(shown, text_style),
            ]);
            let row_area = Rect::new(area.x, area.y + y, area.width, 1);
            f.render_widget(ratatui::widgets::Paragraph::new(line), row_area);
        }

        if focused && cursor_row >= self.viewport_offset {
            let screen_y = (cursor_row - self.viewport_offset) as u16;
            if screen_y < area.height {
                f.set_cursor_position(Position::new(
                    area.x + gutter + cursor_col as u16,
                    area.y + screen_y,
                ));
            }
        }
    }
}

impl Default for ScriptEditor {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn prev_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx - 1;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Byte offset of the start of logical line `line_idx`.
fn line_start_offset(content: &str, line_idx: usize) -> usize {
    if line_idx == 0 {
        return 0;
    }
    content
        .char_indices()
        .filter(|(_, c)| *c == '\n')
        .nth(line_idx - 1)
        .map(|(i, _)| i + 1)
        .unwrap_or(content.len())
}

/// Greedy word wrap returning byte ranges into `line`.
///
/// Breaks at the last space that fits; falls back to a hard break for words
/// wider than the line. Break-point spaces are consumed (not rendered).
fn wrap_ranges(line: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    if line.width() <= width {
        return vec![0..line.len()];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut current_width = 0;

    for (idx, ch) in line.char_indices() {
        let w = ch.width().unwrap_or(1);
        if current_width + w > width && idx > start {
            let break_at = match last_space {
                Some(space) if space >= start => space,
                _ => idx,
            };
            ranges.push(start..break_at);
            // A break at a space consumes the space itself.
            start = if last_space == Some(break_at) {
                break_at + 1
            } else {
                break_at
            };
            last_space = None;
            current_width = line[start..idx + ch.len_utf8()].width();
        } else {
            current_width += w;
        }
        if ch == ' ' {
            last_space = Some(idx);
        }
    }
    ranges.push(start..line.len());
    ranges
}

fn truncate_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(1);
        if w + cw > width {
            break;
        }
        w += cw;
        out.push(ch);
    }
    out
}
