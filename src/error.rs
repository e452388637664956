//! Error types for dicelisp
//!
//! Evaluation failures inside the Lisp are ordinary values
//! ([`crate::lisp::Value::Error`]); this type covers everything around the
//! interpreter: files, configuration, dice parsing and the terminal.

use std::path::PathBuf;
use thiserror::Error;

use crate::dice::DiceError;

/// Main error type for dicelisp operations
#[derive(Error, Debug)]
pub enum DicelispError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dice expression: {0}")]
    Dice(#[from] DiceError),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Script failed: {0}")]
    Script(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dicelisp operations
pub type Result<T> = std::result::Result<T, DicelispError>;

impl DicelispError {
    /// Create a new script error
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = DicelispError::file_not_found("missing.lsp");
        assert_eq!(err.to_string(), "File not found: missing.lsp");
    }

    #[test]
    fn test_dice_error_converts() {
        let err: DicelispError = DiceError::UnexpectedToken("D".into()).into();
        assert!(err.to_string().starts_with("Invalid dice expression"));
    }
}
