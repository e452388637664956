//! Control flow: `if`, `cond`, `quote`, `eval`, `isEqual`

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{Builtin, Value};

pub(super) fn register(scope: &Scope) {
    bind(
        scope,
        Builtin::form("if", |args, interp, scope| {
            let [condition, then, otherwise] = args else {
                return Value::error("if requires three arguments");
            };
            if interp.eval(condition, scope).is_true() {
                interp.eval(then, scope)
            } else {
                interp.eval(otherwise, scope)
            }
        }),
    );

    bind(
        scope,
        Builtin::form("cond", |args, interp, scope| {
            if args.is_empty() {
                return Value::error("cond requires at least one clause");
            }
            for clause in args {
                let Value::List(pair) = clause else {
                    return Value::error("each cond clause must be a list of (condition expression)");
                };
                let [condition, expr] = pair.as_slice() else {
                    return Value::error("each cond clause must be a list of (condition expression)");
                };
                if interp.eval(condition, scope).is_true() {
                    return interp.eval(expr, scope);
                }
            }
            Value::error("no matching cond clause")
        }),
    );

    bind(
        scope,
        Builtin::form("quote", |args, _, _| match args {
            [value] => value.clone(),
            _ => Value::error("Quote requires one argument"),
        }),
    );

    bind(
        scope,
        Builtin::function("eval", |args, interp, scope| {
            args.iter()
                .fold(Value::error("No Items to evaluate"), |_, expr| {
                    interp.eval(expr, scope)
                })
        }),
    );

    bind(
        scope,
        Builtin::function("isEqual", |args, _, _| {
            let Some((first, rest)) = args.split_first().filter(|(_, rest)| !rest.is_empty()) else {
                return Value::error("isEqual requires at least two arguments");
            };
            Value::from_bool(rest.iter().all(|v| v == first))
        }),
    );
}

#[cfg(test)]
mod tests {
    use crate::lisp::{Interpreter, Value};

    fn eval(input: &str) -> Value {
        let interp = Interpreter::default();
        let scope = interp.create_scope();
        interp.eval_source(input, &scope).pop().unwrap()
    }

    #[test]
    fn test_if() {
        assert_eq!(eval("(if true 1 2)"), Value::int(1));
        assert_eq!(eval("(if false 1 2)"), Value::int(2));
        assert_eq!(eval("(if 'true' 1 2)"), Value::int(2));
        assert_eq!(eval("(if true 1)"), Value::error("if requires three arguments"));
    }

    #[test]
    fn test_if_only_evaluates_taken_branch() {
        assert_eq!(eval("(if true 1 (def y 2)) y"), Value::atom("y"));
    }

    #[test]
    fn test_cond() {
        assert_eq!(eval("(cond (false 1) (true 2))"), Value::int(2));
        assert_eq!(eval("(cond)"), Value::error("cond requires at least one clause"));
        assert_eq!(eval("(cond (false 1))"), Value::error("no matching cond clause"));
        assert_eq!(
            eval("(cond (true))"),
            Value::error("each cond clause must be a list of (condition expression)")
        );
        assert_eq!(
            eval("(cond x)"),
            Value::error("each cond clause must be a list of (condition expression)")
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            eval("(quote (number/add 1 2))").to_string(),
            "(number/add 1 2)"
        );
        assert_eq!(eval("(quote)"), Value::error("Quote requires one argument"));
    }

    #[test]
    fn test_eval() {
        assert_eq!(eval("(eval (quote (number/add 1 2)))"), Value::int(3));
        assert_eq!(eval("(eval)"), Value::error("No Items to evaluate"));
    }

    #[test]
    fn test_is_equal() {
        assert_eq!(eval("(isEqual 1 1 1.0)"), Value::truth());
        assert_eq!(eval("(isEqual 'a' 'a' 'b')"), Value::falsity());
        assert_eq!(eval("(isEqual (list 1 2) (list 1 2))"), Value::truth());
        assert_eq!(
            eval("(isEqual 1)"),
            Value::error("isEqual requires at least two arguments")
        );
    }
}
