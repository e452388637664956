//! `roll`: dice expressions from Lisp

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{Builtin, Value};

pub(super) fn register(scope: &Scope) {
    bind(
        scope,
        Builtin::function("roll", |args, interp, _| {
            let [Value::Text(input)] = args else {
                return Value::error("roll requires one argument of type text");
            };
            match interp.roll(input) {
                Ok(result) => Value::List(vec![
                    Value::int(result.value),
                    Value::text(result.to_string()),
                    Value::int(result.min),
                    Value::int(result.max),
                ]),
                Err(e) => Value::error(e.to_string()),
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use crate::dice::FixedRoller;
    use crate::lisp::{Interpreter, Value};

    fn eval(input: &str) -> Value {
        let interp = Interpreter::default().with_roller(FixedRoller(4));
        let scope = interp.create_scope();
        interp.eval_source(input, &scope).pop().unwrap()
    }

    #[test]
    fn test_roll() {
        assert_eq!(
            eval("(roll '2d6')"),
            Value::List(vec![
                Value::int(8),
                Value::text("2D6: 8"),
                Value::int(2),
                Value::int(12),
            ])
        );
    }

    #[test]
    fn test_roll_with_modifier() {
        assert_eq!(eval("(list/first (roll '+ 1d6 3'))"), Value::int(7));
    }

    #[test]
    fn test_roll_errors() {
        assert!(eval("(roll 5)").is_error());
        assert!(eval("(roll)").is_error());
        assert!(eval("(roll 'd6')").is_error());
    }
}
