//! List operators: `list` and the `list/` namespace

use bigdecimal::ToPrimitive;

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{Builtin, Value};

pub(super) fn register(scope: &Scope) {
    bind(scope, Builtin::function("list", |args, _, _| Value::List(args.to_vec())));

    bind(
        scope,
        Builtin::function("list/append", |args, _, _| {
            let Some((first, items)) = args.split_first().filter(|(_, items)| !items.is_empty()) else {
                return Value::error("requires a list and at least one item to append");
            };
            let Value::List(list) = first else {
                return Value::error("first argument must be a list");
            };
            Value::List(list.iter().chain(items).cloned().collect())
        }),
    );

    bind(
        scope,
        Builtin::function("list/prepend", |args, _, _| {
            let Some((first, items)) = args.split_first().filter(|(_, items)| !items.is_empty()) else {
                return Value::error("requires a list and at least one item to prepend");
            };
            let Value::List(list) = first else {
                return Value::error("first argument must be a list");
            };
            Value::List(items.iter().chain(list).cloned().collect())
        }),
    );

    bind(
        scope,
        Builtin::function("list/isEmpty", |args, _, _| match args {
            [Value::List(list)] => Value::from_bool(list.is_empty()),
            [_] => Value::error("isEmpty requires a list argument"),
            _ => Value::error("isEmpty requires exactly one argument"),
        }),
    );

    bind(
        scope,
        Builtin::function("list/first", |args, _, _| match args {
            [Value::List(list)] => list
                .first()
                .cloned()
                .unwrap_or_else(|| Value::error("first called on an empty list")),
            [_] => Value::error("first requires a list argument"),
            _ => Value::error("first requires exactly one argument"),
        }),
    );

    bind(
        scope,
        Builtin::function("list/rest", |args, _, _| match args {
            [Value::List(list)] if list.is_empty() => Value::error("rest called on an empty list"),
            [Value::List(list)] => Value::List(list[1..].to_vec()),
            [_] => Value::error("rest requires a list argument"),
            _ => Value::error("rest requires exactly one argument"),
        }),
    );

    bind(
        scope,
        Builtin::function("list/contains", |args, _, _| match args {
            [Value::List(list), item] => Value::from_bool(list.contains(item)),
            [_, _] => Value::error("list/contains requires a list as the first argument"),
            _ => Value::error("list/contains requires exactly two arguments"),
        }),
    );

    bind(
        scope,
        Builtin::function("list/nth", |args, _, _| match args {
            [Value::List(list), Value::Number(n)] => {
                if !n.is_integer() {
                    return Value::error("list/nth requires an integral index");
                }
                n.to_usize()
                    .and_then(|i| list.get(i))
                    .cloned()
                    .unwrap_or_else(|| Value::error("list/nth index out of bounds"))
            }
            [Value::List(_), _] => Value::error("list/nth requires a number as the second argument"),
            [_, _] => Value::error("list/nth requires a list as the first argument"),
            _ => Value::error("list/nth requires exactly two arguments"),
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
    fn test_list() {
        assert_eq!(eval("(list)"), Value::List(vec![]));
        assert_eq!(eval("(list 1 (number/add 1 1))").to_string(), "(1 2)");
    }

    #[test]
    fn test_append_and_prepend() {
        assert_eq!(eval("(list/append (list 1) 2 3)").to_string(), "(1 2 3)");
        assert_eq!(eval("(list/prepend (list 3) 1 2)").to_string(), "(1 2 3)");
        assert_eq!(
            eval("(list/append (list 1))"),
            Value::error("requires a list and at least one item to append")
        );
        assert_eq!(
            eval("(list/prepend 1 2)"),
            Value::error("first argument must be a list")
        );
    }

    #[test]
    fn test_first_rest_empty() {
        assert_eq!(eval("(list/first (list 1 2))"), Value::int(1));
        assert_eq!(eval("(list/rest (list 1 2))").to_string(), "(2)");
        assert_eq!(eval("(list/isEmpty (list))"), Value::truth());
        assert_eq!(eval("(list/isEmpty (list 1))"), Value::falsity());
        assert_eq!(eval("(list/first (list))"), Value::error("first called on an empty list"));
        assert_eq!(eval("(list/rest (list))"), Value::error("rest called on an empty list"));
        assert_eq!(eval("(list/isEmpty 1)"), Value::error("isEmpty requires a list argument"));
    }

    #[test]
    fn test_contains() {
        assert_eq!(eval("(list/contains (list 1 'a') 'a')"), Value::truth());
        assert_eq!(eval("(list/contains (list 1 'a') b)"), Value::falsity());
        assert!(eval("(list/contains 1 1)").is_error());
    }

    #[test]
    fn test_nth() {
        assert_eq!(eval("(list/nth (list 'a' 'b') 1)"), Value::text("b"));
        assert_eq!(eval("(list/nth (list 'a' 'b') 1.0)"), Value::text("b"));
        assert_eq!(
            eval("(list/nth (list 'a') 3)"),
            Value::error("list/nth index out of bounds")
        );
        assert_eq!(
            eval("(list/nth (list 'a') -1)"),
            Value::error("list/nth index out of bounds")
        );
        assert!(eval("(list/nth (list 'a') 0.5)").is_error());
    }
}
