//! Command-line interface for dicelisp

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dicelisp - a dice-rolling Lisp workbench
///
/// Roll tabletop dice expressions, script them in a small Lisp and keep
/// everything in named contexts inside a terminal workbench.
#[derive(Parser, Debug)]
#[command(name = "dicelisp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to the workbench)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DICELISP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory `import` and `open` resolve against
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the terminal workbench
    Tui,

    /// Evaluate a script file and print each result
    Run(RunArgs),

    /// Evaluate one line of Lisp and print the result
    Eval(EvalArgs),

    /// Roll a dice expression
    Roll(RollArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Script to evaluate
    #[arg(required = true)]
    pub file: PathBuf,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Lisp source, e.g. "(roll '2d6')"
    #[arg(required = true)]
    pub expr: String,
}

/// Arguments for the roll command
#[derive(Parser, Debug)]
pub struct RollArgs {
    /// Dice expression, e.g. "+ 2d6 3"; separate words are joined with spaces
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub dice: Vec<String>,
}

impl RollArgs {
    /// The dice expression as one string
    pub fn expression(&self) -> String {
        self.dice.join(" ")
    }
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Reset configuration to defaults
    Reset,
    /// Set a configuration value
    Set {
        /// Configuration key, e.g. interpreter.max_depth
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether this invocation hands the terminal to the workbench
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}
