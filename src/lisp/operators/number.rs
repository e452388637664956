//! Number operators under `number/`

use bigdecimal::{BigDecimal, Zero};

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{plain_number, round_decimal, Builtin, Value};

type BinaryOp = fn(&BigDecimal, &BigDecimal) -> Result<BigDecimal, &'static str>;

const BINARY_OPS: &[(&str, BinaryOp)] = &[
    ("number/add", |a, b| Ok(a + b)),
    ("number/sub", |a, b| Ok(a - b)),
    ("number/mul", |a, b| Ok(a * b)),
    ("number/div", |a, b| nonzero(b).map(|b| a / b)),
    ("number/mod", |a, b| nonzero(b).map(|b| a % b)),
    ("number/divInt", |a, b| nonzero(b).map(|b| (a / b).with_scale(0))),
];

fn nonzero(n: &BigDecimal) -> Result<&BigDecimal, &'static str> {
    if n.is_zero() {
        Err("division by zero")
    } else {
        Ok(n)
    }
}

/// Builtin applying `op` to exactly two numbers
fn binary_number(name: &str, op: BinaryOp) -> Builtin {
    Builtin::function(name, move |args, _, _| match args {
        [Value::Number(a), Value::Number(b)] => match op(a, b) {
            Ok(n) => Value::Number(round_decimal(n)),
            Err(e) => Value::error(e),
        },
        _ => Value::error("requires two arguments of type Number"),
    })
}

pub(super) fn register(scope: &Scope) {
    for &(name, op) in BINARY_OPS {
        bind(scope, binary_number(name, op));
    }

    bind(
        scope,
        Builtin::function("number/text", |args, _, _| match args {
            [Value::Number(n)] => Value::text(plain_number(n)),
            [_] => Value::error("number/text requires a number argument"),
            _ => Value::error("number/text requires exactly one argument"),
        }),
    );
}
