//! Multi-line file editor panel

use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::focus_style;
use super::tab_pane::Panel;
use crate::error::Result;
use crate::session::Session;

/// Width of the line-number gutter, `"123 "`
const GUTTER_WIDTH: usize = 4;

/// Editor over a single file
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: PathBuf,
    lines: Vec<Vec<char>>,
    cursor_row: usize,
    cursor_col: usize,
    scroll_row: usize,
    scroll_col: usize,
    viewport_rows: usize,
    viewport_cols: usize,
    dirty: bool,
}

impl FileEditor {
    /// Open `path`, creating an empty file if it does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::info!(path = %path.display(), "creating file");
            fs::write(&path, "")?;
        }
        let content = fs::read_to_string(&path)?;
        let mut lines: Vec<Vec<char>> = content.lines().map(|l| l.chars().collect()).collect();
        if lines.is_empty() {
            lines.push(Vec::new());
        }

        Ok(Self {
            path,
            lines,
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            viewport_rows: 20,
            viewport_cols: 80,
            dirty: false,
        })
    }

    /// Write the buffer back to disk
    pub fn save(&mut self) -> Result<()> {
        fs::write(&self.path, self.text())?;
        self.dirty = false;
        tracing::info!(path = %self.path.display(), lines = self.lines.len(), "saved file");
        Ok(())
    }

    /// File being edited
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffer contents, one newline after each line
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().collect::<String>() + "\n")
            .collect()
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cursor as (row, column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// First visible (row, column)
    pub fn scroll(&self) -> (usize, usize) {
        (self.scroll_row, self.scroll_col)
    }

    /// Set the text area size
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport_rows = rows.max(1);
        self.viewport_cols = cols.max(1);
        self.adjust_scroll();
    }

    /// Apply an editing key; Ctrl+S saves
    pub fn edit(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.save()?,
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.delete_back(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = self.current_line_len(),
            _ => {}
        }
        self.adjust_scroll();
        Ok(())
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.cursor_row].len()
    }

    fn insert_char(&mut self, c: char) {
        self.lines[self.cursor_row].insert(self.cursor_col, c);
        self.cursor_col += 1;
        self.dirty = true;
    }

    fn insert_newline(&mut self) {
        let remainder = self.lines[self.cursor_row].split_off(self.cursor_col);
        self.lines.insert(self.cursor_row + 1, remainder);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.dirty = true;
    }

    fn delete_back(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            self.lines[self.cursor_row].remove(self.cursor_col);
            self.dirty = true;
        } else if self.cursor_row > 0 {
            let line = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.current_line_len();
            self.lines[self.cursor_row].extend(line);
            self.dirty = true;
        }
    }

    fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.current_line_len());
        }
    }

    fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.current_line_len());
        }
    }

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.current_line_len();
        }
    }

    fn move_right(&mut self) {
        if self.cursor_col < self.current_line_len() {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    fn adjust_scroll(&mut self) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + self.viewport_rows {
            self.scroll_row = self.cursor_row + 1 - self.viewport_rows;
        }

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + self.viewport_cols {
            self.scroll_col = self.cursor_col + 1 - self.viewport_cols;
        }
    }
}

impl Panel for FileEditor {
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session) {
        if let Err(e) = self.edit(key) {
            tracing::warn!(path = %self.path.display(), error = %e, "save failed");
            session.log(format!("save failed: {}", e));
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, _session: &Session) {
        let title = if self.dirty {
            format!(" {} [modified] ", self.path.display())
        } else {
            format!(" {} ", self.path.display())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused))
            .title(title);
        let inner = block.inner(area);
        self.set_viewport(
            inner.height as usize,
            (inner.width as usize).saturating_sub(GUTTER_WIDTH),
        );

        let gutter_style = Style::default().fg(Color::DarkGray);
        let lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll_row)
            .take(self.viewport_rows)
            .map(|(i, line)| {
                let visible: String = line
                    .iter()
                    .skip(self.scroll_col)
                    .take(self.viewport_cols)
                    .collect();
                Line::from(vec![
                    Span::styled(format!("{:>3} ", i + 1), gutter_style),
                    Span::raw(visible),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);

        if focused {
            let x = inner.x as usize + GUTTER_WIDTH + (self.cursor_col - self.scroll_col);
            let y = inner.y as usize + (self.cursor_row - self.scroll_row);
            f.set_cursor(x as u16, y as u16);
        }
    }
}
