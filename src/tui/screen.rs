//! Top-level workbench layout

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::file_editor::FileEditor;
use super::input_bar::InputBar;
use super::output_log::{LogSource, OutputLog};
use super::tab_pane::TabPane;
use crate::session::Session;

/// Component receiving key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The command line
    Input,
    /// The tab pane
    Tabs,
}

/// Clock header, tab pane and input bar over a session
pub struct Screen {
    session: Session,
    title: String,
    started: DateTime<Local>,
    input: InputBar,
    tabs: TabPane,
    focus: Focus,
}

impl Screen {
    /// Build the workbench with Output and Console tabs
    pub fn new(session: Session, prompt: &str, title: impl Into<String>) -> Self {
        let mut tabs = TabPane::new();
        tabs.add_tab("Output", Box::new(OutputLog::new(LogSource::Output)));
        tabs.add_tab("Console", Box::new(OutputLog::new(LogSource::Console)));

        Self {
            session,
            title: title.into(),
            started: Local::now(),
            input: InputBar::new(prompt),
            tabs,
            focus: Focus::Input,
        }
    }

    /// The session behind the screen
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Which component has focus
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The tab pane
    pub fn tabs(&self) -> &TabPane {
        &self.tabs
    }

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Route a key press to the focused component
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => self.session.shutdown(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Tabs,
                    Focus::Tabs => Focus::Input,
                };
            }
            _ => match self.focus {
                Focus::Input => {
                    if let Some(command) = self.input.handle_key(key, self.session.history()) {
                        self.submit(&command);
                    }
                }
                Focus::Tabs => self.tabs.handle_key(key, &mut self.session),
            },
        }
    }

    /// Evaluate a command and open any files it asked for
    pub fn submit(&mut self, command: &str) {
        self.session.submit(command);
        for path in self.session.take_open_requests() {
            match FileEditor::open(&path) {
                Ok(editor) => {
                    let label = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    let index = self.tabs.add_tab(label, Box::new(editor));
                    self.tabs.set_active(index);
                    self.focus = Focus::Tabs;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not open file");
                    self.session.log(format!("could not open {}: {}", path.display(), e));
                }
            }
        }
    }

    /// Header text: title, clock, runtime and active context
    pub fn header(&self, now: DateTime<Local>) -> String {
        let runtime = (now - self.started).num_minutes();
        format!(
            "{}  Time: {}  Runtime: {} minutes  Context: {}",
            self.title,
            now.format("%Y-%m-%d %H:%M"),
            runtime,
            self.session.active_context()
        )
    }

    /// Draw the whole screen
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(f.size());

        let header = Line::from(Span::styled(
            self.header(Local::now()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(header), chunks[0]);

        self.tabs
            .render(f, chunks[1], self.focus == Focus::Tabs, &self.session);
        self.input.render(f, chunks[2], self.focus == Focus::Input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lisp::Interpreter;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn screen_in(dir: &TempDir) -> Screen {
        Screen::new(Session::new(Interpreter::new(dir.path())), " > ", "dicelisp")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(screen: &mut Screen, line: &str) {
        for c in line.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        screen.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_tab_cycles_focus() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        assert_eq!(screen.focus(), Focus::Input);
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus(), Focus::Tabs);
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus(), Focus::Input);
    }

    #[test]
    fn test_typed_command_is_evaluated() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        type_line(&mut screen, "(number/add 2 3)");
        assert_eq!(screen.session().output(), ["5"]);
    }

    #[test]
    fn test_quit_and_ctrl_c_stop() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        type_line(&mut screen, "(quit)");
        assert!(!screen.is_running());

        let mut screen = screen_in(&dir);
        screen.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!screen.is_running());
    }

    #[test]
    fn test_open_adds_editor_tab() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        type_line(&mut screen, "(open 'notes.lisp')");
        assert_eq!(screen.tabs().len(), 3);
        assert_eq!(screen.tabs().active(), 2);
        assert_eq!(screen.focus(), Focus::Tabs);
        assert!(dir.path().join("notes.lisp").exists());
        assert!(screen.tabs().tab_bar().contains("[ notes.lisp ]"));
    }

    #[test]
    fn test_header_shows_runtime_and_context() {
        let dir = TempDir::new().unwrap();
        let screen = screen_in(&dir);
        let later = screen.started + chrono::Duration::minutes(7);
        let header = screen.header(later);
        assert!(header.contains("Runtime: 7 minutes"));
        assert!(header.ends_with("Context: /"));
    }

    #[test]
    fn test_render_draws_tabs_and_prompt() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        type_line(&mut screen, "'hello'");

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| screen.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol.as_str()).collect();
        assert!(text.contains("[ Output ]"));
        assert!(text.contains("1: hello"));
        assert!(text.contains(" > "));
    }
}
