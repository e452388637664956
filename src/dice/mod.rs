//! Tabletop dice expressions
//!
//! A tiny prefix language: `2d6`, `+ 1d20 5`, `- 3d4 1 + 2 2d8`.
//! Expressions are lexed, parsed into a [`DiceExpr`] tree and evaluated
//! against a [`DieRoller`], which makes rolls reproducible in tests.

mod lexer;
mod parser;

pub use lexer::*;
pub use parser::*;

use rand::Rng;
use thiserror::Error;

/// Largest number of dice a single `XdY` term may roll
pub const MAX_DICE: i64 = 10_000;

/// Errors raised while parsing a dice expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unexpected input after expression: '{0}'")]
    TrailingTokens(String),

    #[error("number out of range: {0}")]
    InvalidNumber(String),

    #[error("invalid die: {0}")]
    InvalidDie(String),
}

/// Source of die faces
pub trait DieRoller {
    /// Roll one die, returning a face between 1 and `sides`
    fn roll(&mut self, sides: i64) -> i64;
}

/// Roller backed by the thread-local random generator
pub struct RandomRoller {
    rng: rand::rngs::ThreadRng,
}

impl RandomRoller {
    /// Create a new random roller
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DieRoller for RandomRoller {
    fn roll(&mut self, sides: i64) -> i64 {
        if sides < 1 {
            return 0;
        }
        self.rng.random_range(1..=sides)
    }
}

/// Roller that always shows the same face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRoller(pub i64);

impl DieRoller for FixedRoller {
    fn roll(&mut self, _sides: i64) -> i64 {
        self.0
    }
}

/// Lex, parse and evaluate a dice expression in one step
pub fn roll(input: &str, roller: &mut dyn DieRoller) -> Result<RollResult, DiceError> {
    let tokens = lex(input);
    let expr = parse(&tokens)?;
    tracing::debug!(input, expr = %expr, "rolling dice expression");
    Ok(expr.eval(roller))
}
