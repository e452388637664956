//! Command execution handlers

use std::path::Path;

use console::style;

use crate::config::Config;
use crate::error::{DicelispError, Result};
use crate::lisp::{Interpreter, Value};
use crate::session::Session;
use crate::tui::{self, Screen};

/// Load the configuration a command runs with.
///
/// `config` subcommands fall back to defaults when the file does not parse,
/// so `reset` and `init --force` can still replace it.
pub fn load_config(command: Option<&super::Commands>, path: &Path) -> Result<Config> {
    match (command, Config::load(path)) {
        (_, Ok(config)) => Ok(config),
        (Some(super::Commands::Config(_)), Err(e)) => {
            eprintln!("{} {}", style("Warning:").yellow().bold(), e);
            Ok(Config::default())
        }
        (_, Err(e)) => Err(e),
    }
}

/// Build a session from configuration, honouring a `--dir` override
pub fn build_session(config: &Config, dir: Option<&Path>) -> Session {
    let import_dir = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| config.import_dir());
    tracing::debug!(import_dir = %import_dir.display(), max_depth = config.interpreter.max_depth, "building session");

    let interpreter = Interpreter::new(import_dir).with_max_depth(config.interpreter.max_depth);
    Session::new(interpreter)
}

/// Execute the tui command
pub fn execute_tui(config: &Config, session: Session) -> Result<()> {
    let screen = Screen::new(session, &config.tui.prompt, config.tui.title.clone());
    tui::run(screen, config.tick_rate())
}

/// Execute the run command
pub fn execute_run(args: &super::RunArgs, session: &mut Session) -> Result<()> {
    let results = session.run_file(&args.file)?;
    let failures = results.iter().filter(|r| r.is_error()).count();

    for result in &results {
        print_value(result);
    }
    print_console(session);

    if failures > 0 {
        return Err(DicelispError::script(format!(
            "{} of {} expressions in {} failed",
            failures,
            results.len(),
            args.file.display()
        )));
    }
    Ok(())
}

/// Execute the eval command
pub fn execute_eval(args: &super::EvalArgs, session: &mut Session) -> Result<()> {
    let result = session.submit(&args.expr);
    print_console(session);

    match result {
        Some(Value::Error(message)) => Err(DicelispError::script(message)),
        Some(value) => {
            println!("{}", value.to_display_string());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Execute the roll command
pub fn execute_roll(args: &super::RollArgs, session: &Session) -> Result<()> {
    let result = session.interpreter().roll(&args.expression())?;
    println!(
        "{}: {} {}",
        style(&result.description).cyan(),
        style(result.value).bold(),
        style(format!("({}..{})", result.min, result.max)).dim()
    );
    Ok(())
}

/// Execute the config command
pub fn execute_config(args: &super::ConfigArgs, path: Option<&Path>) -> Result<()> {
    let config_path = Config::resolve_path(path)?;

    match &args.command {
        super::ConfigCommands::Show => {
            let config = Config::load(&config_path)?;
            println!("{} {}\n", style("#").dim(), style(config_path.display()).dim());
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| DicelispError::Other(e.to_string()))?
            );
        }
        super::ConfigCommands::Reset => {
            Config::reset(&config_path)?;
            println!("Configuration reset to defaults");
        }
        super::ConfigCommands::Set { key, value } => {
            let mut config = Config::load(&config_path)?;
            config.set(key, value)?;
            config.save(&config_path)?;
            println!("Set {} = {}", style(key).bold(), value);
        }
        super::ConfigCommands::Get { key } => {
            let config = Config::load(&config_path)?;
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                println!("Key '{}' not found", key);
            }
        }
        super::ConfigCommands::Init { force } => {
            Config::init(&config_path, *force)?;
            println!("Configuration initialized at {}", config_path.display());
        }
    }

    Ok(())
}

fn print_value(value: &Value) {
    if value.is_error() {
        println!("{}", style(value.to_display_string()).red());
    } else {
        println!("{}", value.to_display_string());
    }
}

fn print_console(session: &Session) {
    for line in session.console() {
        eprintln!("{} {}", style("log:").dim(), line);
    }
}
