//! Type predicates under `type/`

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{Builtin, Value};

const PREDICATES: &[(&str, fn(&Value) -> bool)] = &[
    ("type/isList", |v| matches!(v, Value::List(_))),
    ("type/isText", |v| matches!(v, Value::Text(_))),
    ("type/isAtom", |v| matches!(v, Value::Atom(_))),
    ("type/isNumber", |v| matches!(v, Value::Number(_))),
    ("type/isError", |v| matches!(v, Value::Error(_))),
    ("type/isLambda", |v| matches!(v, Value::Lambda(_) | Value::Builtin(_))),
];

pub(super) fn register(scope: &Scope) {
    for &(name, predicate) in PREDICATES {
        bind(
            scope,
            Builtin::function(name, move |args, _, _| match args {
                [value] => Value::from_bool(predicate(value)),
                _ => Value::error("requires one argument."),
            }),
        );
    }
}
