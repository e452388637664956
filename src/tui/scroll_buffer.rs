//! Single-line editing buffer with horizontal scrolling

/// Prompt shown before user input
pub const DEFAULT_PROMPT: &str = " > ";

/// A one-line text buffer behind a fixed prompt.
///
/// The prompt is stored in the buffer itself and the cursor can never move
/// into it. Positions are in characters.
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    prefix_len: usize,
    buffer: Vec<char>,
    cursor: usize,
    scroll: usize,
    visible_width: usize,
}

impl ScrollBuffer {
    /// Create an empty buffer behind `prefix`
    pub fn new(prefix: &str) -> Self {
        let mut sb = Self {
            prefix_len: prefix.chars().count(),
            buffer: prefix.chars().collect(),
            cursor: 0,
            scroll: 0,
            visible_width: 1024,
        };
        sb.reset();
        sb
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.move_cursor_right();
    }

    /// Delete the character before the cursor, never touching the prompt
    pub fn delete_back(&mut self) {
        if self.cursor > self.prefix_len {
            self.move_cursor_left();
            self.buffer.remove(self.cursor);
            self.adjust_scroll();
        }
    }

    /// Move one character left
    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1).max(self.prefix_len);
        self.adjust_scroll();
    }

    /// Move one character right
    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.len());
        self.adjust_scroll();
    }

    /// Jump to the first input character
    pub fn move_cursor_to_start(&mut self) {
        self.cursor = self.prefix_len;
        self.adjust_scroll();
    }

    /// Jump past the last input character
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.buffer.len();
        self.adjust_scroll();
    }

    /// Replace the input, leaving the cursor at the start
    pub fn set_content(&mut self, text: &str) {
        self.reset();
        let at = self.prefix_len;
        self.buffer.splice(at..at, text.chars());
        self.adjust_scroll();
    }

    /// Input without the prompt, trimmed
    pub fn text(&self) -> String {
        self.buffer[self.prefix_len..]
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// The visible window of prompt and input, padded to the visible width
    pub fn visible_slice(&self) -> String {
        let end = self.buffer.len().min(self.scroll + self.visible_width);
        let mut visible: String = self.buffer[self.scroll.min(end)..end].iter().collect();
        let shown = end.saturating_sub(self.scroll);
        visible.extend(std::iter::repeat(' ').take(self.visible_width.saturating_sub(shown)));
        visible
    }

    /// Cursor column relative to the visible window
    pub fn cursor_screen_position(&self) -> usize {
        self.cursor - self.scroll
    }

    /// Set how many characters fit on screen
    pub fn set_visible_width(&mut self, width: usize) {
        self.visible_width = width.max(1);
        self.adjust_scroll();
    }

    /// Clear the input back to just the prompt
    pub fn reset(&mut self) {
        self.buffer.truncate(self.prefix_len);
        self.cursor = self.prefix_len;
        self.scroll = 0;
    }

    fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.visible_width {
            self.scroll = self.cursor + 1 - self.visible_width;
        }
    }
}

impl Default for ScrollBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}
