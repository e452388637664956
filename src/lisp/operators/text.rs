//! Text operators under `text/`

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{Builtin, Value};

pub(super) fn register(scope: &Scope) {
    bind(
        scope,
        Builtin::function("text/concat", |args, _, _| {
            let joined: String = args
                .iter()
                .filter_map(|arg| match arg {
                    Value::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect();
            Value::Text(joined)
        }),
    );

    bind(
        scope,
        Builtin::function("text/startsWith", |args, _, _| match args {
            [Value::Text(text), Value::Text(prefix)] => Value::from_bool(text.starts_with(prefix.as_str())),
            _ => Value::error("text/startsWith requires exactly two arguments of type text"),
        }),
    );

    bind(
        scope,
        Builtin::function("text/toAtom", |args, _, _| match args {
            [Value::Text(text)] => Value::atom(text.as_str()),
            _ => Value::error("toAtom requires exactly one argument of type text"),
        }),
    );

    bind(
        scope,
        Builtin::function("text/fromAtom", |args, _, _| match args {
            [Value::Atom(atom)] => Value::text(atom.as_str()),
            _ => Value::error("fromAtom requires exactly one argument of type atom"),
        }),
    );

    bind(
        scope,
        Builtin::function("text/toError", |args, _, _| match args {
            [Value::Text(message)] => Value::error(message.as_str()),
            [_] => Value::error("Unable to make error from type"),
            _ => Value::error("requires one argument."),
        }),
    );
}
