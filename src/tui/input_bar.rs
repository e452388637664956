//! Command line at the bottom of the screen

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::scroll_buffer::ScrollBuffer;
use super::focus_style;

/// Input line with history navigation
#[derive(Debug, Clone)]
pub struct InputBar {
    buffer: ScrollBuffer,
    /// History entry on display, counted back from the newest
    history_pos: Option<usize>,
}

impl InputBar {
    /// Create an input bar showing `prompt`
    pub fn new(prompt: &str) -> Self {
        Self {
            buffer: ScrollBuffer::new(prompt),
            history_pos: None,
        }
    }

    /// Handle a key press. Returns the submitted command on Enter.
    ///
    /// `history` is the session's command history, oldest first.
    pub fn handle_key(&mut self, key: KeyEvent, history: &[String]) -> Option<String> {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) => self.buffer.insert(c),
            KeyCode::Backspace => self.buffer.delete_back(),
            KeyCode::Left if alt => self.buffer.move_cursor_to_start(),
            KeyCode::Left => self.buffer.move_cursor_left(),
            KeyCode::Right if alt => self.buffer.move_cursor_to_end(),
            KeyCode::Right => self.buffer.move_cursor_right(),
            KeyCode::Home => self.buffer.move_cursor_to_start(),
            KeyCode::End => self.buffer.move_cursor_to_end(),
            KeyCode::Up => self.history_back(history),
            KeyCode::Down => self.history_forward(history),
            KeyCode::Enter => return Some(self.submit()),
            _ => {}
        }
        None
    }

    /// Current input, trimmed
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    fn history_back(&mut self, history: &[String]) {
        if history.is_empty() {
            return;
        }
        let pos = self
            .history_pos
            .map_or(0, |pos| (pos + 1).min(history.len() - 1));
        self.history_pos = Some(pos);
        self.load_history(pos, history);
    }

    fn history_forward(&mut self, history: &[String]) {
        match self.history_pos {
            Some(pos) if pos > 0 => {
                self.history_pos = Some(pos - 1);
                self.load_history(pos - 1, history);
            }
            _ => {
                self.history_pos = None;
                self.buffer.reset();
            }
        }
    }

    /// Load the entry `index` steps back from the newest
    fn load_history(&mut self, index: usize, history: &[String]) {
        self.buffer.reset();
        if let Some(command) = history.iter().rev().nth(index) {
            self.buffer.set_content(command);
            self.buffer.move_cursor_to_end();
        }
    }

    fn submit(&mut self) -> String {
        let command = self.buffer.text();
        self.history_pos = None;
        self.buffer.reset();
        command
    }

    /// Draw the bar and, when focused, place the terminal cursor
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused));
        let inner = block.inner(area);
        self.buffer.set_visible_width(inner.width as usize);

        f.render_widget(Paragraph::new(self.buffer.visible_slice()).block(block), area);

        if focused {
            let x = inner.x + self.buffer.cursor_screen_position() as u16;
            f.set_cursor(x.min(inner.right().saturating_sub(1)), inner.y);
        }
    }
}

impl Default for InputBar {
    fn default() -> Self {
        Self::new(super::scroll_buffer::DEFAULT_PROMPT)
    }
}
