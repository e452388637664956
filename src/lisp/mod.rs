//! A small prefix-notation Lisp
//!
//! ```text
//! (def double (lambda (x) (number/mul x 2)))
//! (double (list/first (roll '3d6')))
//! ```
//!
//! Source is lexed into [`Token`]s, parsed into [`Value`]s and evaluated by
//! the [`Interpreter`] against a chain of [`Scope`]s.

mod interpreter;
mod lexer;
mod operators;
mod parser;
mod scope;
mod value;

pub use interpreter::{Interpreter, DEFAULT_MAX_DEPTH};
pub use lexer::{lex, Token, TokenKind};
pub use parser::{parse, parse_all, MAX_NESTING};
pub use scope::Scope;
pub use value::{plain_number, round_decimal, Builtin, BuiltinKind, Lambda, Value, DECIMAL_PRECISION};
