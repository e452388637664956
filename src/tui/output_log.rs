//! Scrollable, numbered log panel

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::focus_style;
use super::tab_pane::Panel;
use crate::session::Session;
use crate::text::chunk;

/// Which session log a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    /// Echoed results
    Output,
    /// Lines written with `log`
    Console,
}

impl LogSource {
    fn lines(self, session: &Session) -> &[String] {
        match self {
            Self::Output => session.output(),
            Self::Console => session.console(),
        }
    }
}

/// Shows a session log newest first, each entry prefixed with its number
#[derive(Debug, Clone)]
pub struct OutputLog {
    source: LogSource,
    offset: usize,
}

impl OutputLog {
    /// Create a panel over `source`
    pub fn new(source: LogSource) -> Self {
        Self { source, offset: 0 }
    }

    /// Entries skipped from the newest end
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scroll towards older entries
    pub fn scroll_up(&mut self, total: usize) {
        self.offset = (self.offset + 1).min(total);
    }

    /// Scroll towards newer entries
    pub fn scroll_down(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Lay out `lines` into at most `rows` screen rows of `width` columns
    pub fn visible_lines(&self, lines: &[String], width: usize, rows: usize) -> Vec<String> {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        lines
            .iter()
            .enumerate()
            .rev()
            .skip(self.offset)
            .flat_map(|(i, line)| chunk(&format!("{}: {}", i + 1, line), width))
            .take(rows)
            .collect()
    }
}

impl Panel for OutputLog {
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Up => self.scroll_up(self.source.lines(session).len()),
            KeyCode::Down => self.scroll_down(),
            _ => {}
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, session: &Session) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused));
        let inner = block.inner(area);
        let lines: Vec<Line> = self
            .visible_lines(
                self.source.lines(session),
                inner.width as usize,
                inner.height as usize,
            )
            .into_iter()
            .map(Line::from)
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
