//! Tabbed panel container

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::session::Session;

/// A component that can live in a tab
pub trait Panel {
    /// React to a key press while the tab pane has focus
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session);

    /// Draw into `area`
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, session: &Session);
}

struct Tab {
    label: String,
    panel: Box<dyn Panel>,
}

/// Tab bar plus the active tab's panel.
///
/// Left and Right switch tabs; other keys go to the active panel.
#[derive(Default)]
pub struct TabPane {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabPane {
    /// Create an empty tab pane
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab, returning its index
    pub fn add_tab(&mut self, label: impl Into<String>, panel: Box<dyn Panel>) -> usize {
        self.tabs.push(Tab {
            label: label.into(),
            panel,
        });
        self.tabs.len() - 1
    }

    /// Switch to the tab at `index`, if it exists
    pub fn set_active(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active = index;
        }
    }

    /// Index of the active tab
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether there are no tabs
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The tab bar as text: `[ Active ]` for the current tab, plain labels otherwise
    pub fn tab_bar(&self) -> String {
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if i == self.active {
                    format!("[ {} ] ", tab.label)
                } else {
                    format!("  {}   ", tab.label)
                }
            })
            .collect()
    }

    /// Route a key press
    pub fn handle_key(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Left => self.active = self.active.saturating_sub(1),
            KeyCode::Right => self.active = (self.active + 1).min(self.tabs.len().saturating_sub(1)),
            _ => {
                if let Some(tab) = self.tabs.get_mut(self.active) {
                    tab.panel.handle_key(key, session);
                }
            }
        }
    }

    /// Draw the tab bar and the active panel
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let bar: Vec<Span> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if i == self.active {
                    Span::styled(
                        format!("[ {} ] ", tab.label),
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(format!("  {}   ", tab.label))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(bar)), chunks[0]);

        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.panel.render(f, chunks[1], focused, session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lisp::Interpreter;
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<KeyCode>>>);

    impl Panel for Recorder {
        fn handle_key(&mut self, key: KeyEvent, _session: &mut Session) {
            self.0.borrow_mut().push(key.code);
        }

        fn render(&mut self, _f: &mut Frame, _area: Rect, _focused: bool, _session: &Session) {}
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_bar_marks_active() {
        let mut pane = TabPane::new();
        let keys = Rc::new(RefCell::new(Vec::new()));
        pane.add_tab("Output", Box::new(Recorder(Rc::clone(&keys))));
        pane.add_tab("Console", Box::new(Recorder(Rc::clone(&keys))));
        assert_eq!(pane.tab_bar(), "[ Output ]   Console   ");
        pane.set_active(1);
        assert_eq!(pane.tab_bar(), "  Output   [ Console ] ");
    }

    #[test]
    fn test_arrows_switch_tabs_within_bounds() {
        let mut session = Session::new(Interpreter::default());
        let keys = Rc::new(RefCell::new(Vec::new()));
        let mut pane = TabPane::new();
        pane.add_tab("a", Box::new(Recorder(Rc::clone(&keys))));
        pane.add_tab("b", Box::new(Recorder(Rc::clone(&keys))));

        pane.handle_key(key(KeyCode::Left), &mut session);
        assert_eq!(pane.active(), 0);
        pane.handle_key(key(KeyCode::Right), &mut session);
        pane.handle_key(key(KeyCode::Right), &mut session);
        assert_eq!(pane.active(), 1);
        assert!(keys.borrow().is_empty());
    }

    #[test]
    fn test_other_keys_reach_active_panel() {
        let mut session = Session::new(Interpreter::default());
        let keys = Rc::new(RefCell::new(Vec::new()));
        let mut pane = TabPane::new();
        pane.add_tab("a", Box::new(Recorder(Rc::clone(&keys))));
        pane.handle_key(key(KeyCode::Up), &mut session);
        pane.handle_key(key(KeyCode::Char('x')), &mut session);
        assert_eq!(*keys.borrow(), vec![KeyCode::Up, KeyCode::Char('x')]);
    }

    #[test]
    fn test_set_active_ignores_missing_tab() {
        let mut pane = TabPane::new();
        pane.set_active(3);
        assert_eq!(pane.active(), 0);
        assert!(pane.is_empty());
    }
}
