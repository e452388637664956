//! Runtime values
//!
//! Source code and data share one representation: the parser produces
//! [`Value`]s and the interpreter evaluates them into [`Value`]s.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use super::interpreter::Interpreter;
use super::scope::Scope;

/// Significant digits kept by number arithmetic (IEEE decimal128)
pub const DECIMAL_PRECISION: u64 = 34;

/// Signature shared by every builtin operator
pub type BuiltinFn = dyn Fn(&[Value], &Interpreter, &Rc<Scope>) -> Value;

/// A Lisp value
#[derive(Clone)]
pub enum Value {
    /// A list, which is also how calls are written
    List(Vec<Value>),
    /// A symbol; unbound atoms evaluate to themselves
    Atom(String),
    /// Quoted text
    Text(String),
    /// An arbitrary precision decimal
    Number(BigDecimal),
    /// An error value, produced instead of aborting evaluation
    Error(String),
    /// A user-defined function closing over its scope
    Lambda(Rc<Lambda>),
    /// A native operator
    Builtin(Builtin),
}

/// A user-defined function
pub struct Lambda {
    /// Parameter atoms
    pub params: Vec<Value>,
    /// Body expressions, evaluated in order
    pub body: Vec<Value>,
    /// Scope captured where the lambda was created
    pub scope: Rc<Scope>,
}

/// How a builtin receives its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// Arguments are evaluated before the call
    Function,
    /// Arguments are passed through unevaluated
    Form,
}

/// A native operator
#[derive(Clone)]
pub struct Builtin {
    name: Rc<str>,
    kind: BuiltinKind,
    func: Rc<BuiltinFn>,
}

impl Builtin {
    /// Create a builtin that receives evaluated arguments
    pub fn function(
        name: &str,
        func: impl Fn(&[Value], &Interpreter, &Rc<Scope>) -> Value + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind: BuiltinKind::Function,
            func: Rc::new(func),
        }
    }

    /// Create a builtin that receives its arguments unevaluated
    pub fn form(
        name: &str,
        func: impl Fn(&[Value], &Interpreter, &Rc<Scope>) -> Value + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind: BuiltinKind::Form,
            func: Rc::new(func),
        }
    }

    /// Name the builtin was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument passing convention
    pub fn kind(&self) -> BuiltinKind {
        self.kind
    }

    /// Invoke the builtin
    pub fn invoke(&self, args: &[Value], interpreter: &Interpreter, scope: &Rc<Scope>) -> Value {
        (self.func)(args, interpreter, scope)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// The atom `true`
    pub fn truth() -> Self {
        Self::Atom("true".into())
    }

    /// The atom `false`
    pub fn falsity() -> Self {
        Self::Atom("false".into())
    }

    /// Convert a Rust bool into `true`/`false`
    pub fn from_bool(b: bool) -> Self {
        if b {
            Self::truth()
        } else {
            Self::falsity()
        }
    }

    /// Whether this is the atom `true`
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Atom(a) if a == "true")
    }

    /// Create an atom
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create an error value
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Create a number from an integer
    pub fn int(value: i64) -> Self {
        Self::Number(BigDecimal::from(value))
    }

    /// Parse a number literal
    pub fn number(literal: &str) -> Self {
        match BigDecimal::from_str(literal) {
            Ok(n) => Self::Number(n),
            Err(e) => Self::Error(format!("invalid number '{}': {}", literal, e)),
        }
    }

    /// Whether this is an error value
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Name of the value's type, as used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Atom(_) => "atom",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Error(_) => "error",
            Self::Lambda(_) => "lambda",
            Self::Builtin(_) => "builtin",
        }
    }

    /// Render for the output log: text is shown raw, everything else as Lisp
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Text(t) => t.clone(),
            other => other.to_string(),
        }
    }
}

/// Round to decimal128 precision when a result grows past it
pub fn round_decimal(n: BigDecimal) -> BigDecimal {
    if n.digits() > DECIMAL_PRECISION {
        n.with_prec(DECIMAL_PRECISION)
    } else {
        n
    }
}

/// Plain (non-scientific) rendering with trailing zeros removed
pub fn plain_number(n: &BigDecimal) -> String {
    n.normalized().to_plain_string()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Atom(a), Self::Atom(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Lambda(a), Self::Lambda(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::List(items) => items.hash(state),
            Self::Atom(s) | Self::Text(s) | Self::Error(s) => s.hash(state),
            Self::Number(n) => n.hash(state),
            Self::Lambda(l) => Rc::as_ptr(l).hash(state),
            Self::Builtin(b) => b.name.hash(state),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => write_list(f, items),
            Self::Atom(a) => f.write_str(a),
            Self::Text(t) => write!(f, "'{}'", t.replace('\'', "''")),
            Self::Number(n) => f.write_str(&n.to_plain_string()),
            Self::Error(e) => write!(f, "(error '{}')", e.replace('\'', "''")),
            Self::Lambda(l) => {
                f.write_str("(lambda ")?;
                write_list(f, &l.params)?;
                for expr in &l.body {
                    write!(f, " {}", expr)?;
                }
                f.write_str(")")
            }
            Self::Builtin(b) => write!(f, "<builtin {}>", b.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(b) => fmt::Debug::fmt(b, f),
            other => write!(f, "{}({})", other.type_name(), other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(Value::number("1.0"), Value::int(1));
        assert_ne!(Value::number("1.5"), Value::int(1));
    }

    #[test]
    fn test_display() {
        let list = Value::List(vec![
            Value::atom("a"),
            Value::text("it's"),
            Value::number("2.50"),
            Value::List(vec![]),
        ]);
        assert_eq!(list.to_string(), "(a 'it''s' 2.50 ())");
        assert_eq!(Value::error("boom").to_string(), "(error 'boom')");
    }

    #[test]
    fn test_display_string_shows_text_raw() {
        assert_eq!(Value::text("hello").to_display_string(), "hello");
        assert_eq!(Value::int(4).to_display_string(), "4");
    }

    #[test]
    fn test_plain_number_strips_zeros() {
        assert_eq!(plain_number(&BigDecimal::from_str("5.00").unwrap()), "5");
        assert_eq!(plain_number(&BigDecimal::from_str("3.14").unwrap()), "3.14");
        assert_eq!(plain_number(&BigDecimal::from(100)), "100");
    }

    #[test]
    fn test_round_decimal_limits_precision() {
        let third = BigDecimal::from(1) / BigDecimal::from(3);
        assert_eq!(round_decimal(third).digits(), DECIMAL_PRECISION);
    }

    #[test]
    fn test_builtins_compare_by_name() {
        let a = Value::Builtin(Builtin::function("x", |_, _, _| Value::int(1)));
        let b = Value::Builtin(Builtin::function("x", |_, _, _| Value::int(2)));
        assert_eq!(a, b);
    }
}
