//! Dicelisp - a dice-rolling Lisp workbench
//!
//! Dicelisp pairs a small prefix dice language (`+ 2d6 3`) with a
//! homoiconic Lisp whose numbers are arbitrary precision decimals, and
//! hosts both inside a terminal workbench with named contexts, a console
//! log and in-place file editing.
//!
//! # Quick Start
//!
//! ```bash
//! # Launch the workbench
//! dicelisp
//!
//! # Roll once from the shell
//! dicelisp roll + 2d6 3
//!
//! # Evaluate a line or a script
//! dicelisp eval "(roll '1d20')"
//! dicelisp run encounter.lisp
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod dice;
pub mod error;
pub mod lisp;
pub mod session;
pub mod text;
pub mod tui;

// Re-export commonly used types
pub use dice::{DieRoller, RollResult};
pub use error::{DicelispError, Result};
pub use lisp::{Interpreter, Scope, Value};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Evaluate Lisp source in a fresh scope and return the last result
///
/// # Example
///
/// ```
/// let value = dicelisp::eval("(number/mul 6 7)");
/// assert_eq!(value.to_string(), "42");
/// ```
pub fn eval(source: &str) -> Value {
    let interpreter = Interpreter::default();
    let scope = interpreter.create_scope();
    interpreter
        .eval_source(source, &scope)
        .pop()
        .unwrap_or_else(|| Value::List(Vec::new()))
}

/// Roll a dice expression with a random roller
pub fn roll(input: &str) -> Result<RollResult> {
    Ok(dice::roll(input, &mut dice::RandomRoller::new())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "dicelisp");
    }

    #[test]
    fn test_eval_blank_is_empty_list() {
        assert_eq!(eval("  "), Value::List(Vec::new()));
    }

    #[test]
    fn test_roll_bounds() {
        let result = roll("2d6").unwrap();
        assert!((2..=12).contains(&result.value));
        assert!(roll("d6").is_err());
    }
}
