//! Terminal workbench
//!
//! The screen is redrawn every tick; key presses are handled as they
//! arrive between ticks.

mod file_editor;
mod input_bar;
mod output_log;
mod screen;
mod scroll_buffer;
mod tab_pane;

pub use file_editor::FileEditor;
pub use input_bar::InputBar;
pub use output_log::{LogSource, OutputLog};
pub use screen::{Focus, Screen};
pub use scroll_buffer::{ScrollBuffer, DEFAULT_PROMPT};
pub use tab_pane::{Panel, TabPane};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    Terminal,
};

use crate::error::{DicelispError, Result};

/// Border style marking the focused component
pub(crate) fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Take over the terminal and run `screen` until the session stops
pub fn run(mut screen: Screen, tick_rate: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(tick_ms = tick_rate.as_millis() as u64, "workbench started");
    let res = run_app(&mut terminal, &mut screen, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        commands = screen.session().history().len(),
        "workbench stopped"
    );
    res.map_err(|e| DicelispError::Terminal(e.to_string()))
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut Screen,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    while screen.is_running() {
        terminal.draw(|f| screen.render(f))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    screen.handle_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
    Ok(())
}
