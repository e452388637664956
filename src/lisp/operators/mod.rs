//! Standard library
//!
//! Operators are grouped by namespace. Each group exposes a `register`
//! function that binds its builtins into a scope.

mod control;
mod list;
mod number;
mod roll;
mod system;
mod text;
mod types;

use super::scope::Scope;
use super::value::{Builtin, Value};

/// Bind every standard operator into `scope`
pub fn register_all(scope: &Scope) {
    control::register(scope);
    roll::register(scope);
    types::register(scope);
    text::register(scope);
    number::register(scope);
    list::register(scope);
    system::register(scope);
    tracing::trace!(count = scope.local_keys().len(), "registered builtins");
}

/// Bind a builtin under its own name
fn bind(scope: &Scope, builtin: Builtin) {
    scope.define_atom(&builtin.name().to_string(), Value::Builtin(builtin));
}
