//! Dicelisp - a dice-rolling Lisp workbench
//!
//! Main entry point for the dicelisp CLI application.

use std::process::ExitCode;

use console::style;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use dicelisp::cli::{self, Cli, Commands};
use dicelisp::config::Config;
use dicelisp::error::Result;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Set up logging based on CLI arguments and configuration.
///
/// The workbench owns stdout, so in that mode events go to the log file
/// through a non-blocking writer whose guard must outlive the UI.
fn setup_logging(cli: &Cli, config: &Config) -> Option<WorkerGuard> {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if cli.is_tui() {
        let path = config.log_file();
        let dir = path.parent().map(|p| p.to_path_buf()).unwrap_or_default();
        let file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "dicelisp.log".into());
        if std::fs::create_dir_all(&dir).is_ok() {
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            return Some(guard);
        }
        return None;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
    None
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = cli::load_config(cli.command.as_ref(), &config_path)?;
    let _guard = setup_logging(&cli, &config);
    tracing::debug!(config = %config_path.display(), "starting");

    let session = || cli::build_session(&config, cli.dir.as_deref());

    // Dispatch to appropriate command handler
    match &cli.command {
        None | Some(Commands::Tui) => cli::execute_tui(&config, session()),
        Some(Commands::Run(args)) => cli::execute_run(args, &mut session()),
        Some(Commands::Eval(args)) => cli::execute_eval(args, &mut session()),
        Some(Commands::Roll(args)) => cli::execute_roll(args, &session()),
        Some(Commands::Config(args)) => cli::execute_config(args, Some(&config_path)),
    }
}
