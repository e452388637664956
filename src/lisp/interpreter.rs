//! Expression evaluator
//!
//! Evaluation never fails outright: problems surface as
//! [`Value::Error`] so scripts can inspect them with `type/isError`.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::dice::{self, DiceError, DieRoller, RandomRoller, RollResult};

use super::lexer::lex;
use super::operators;
use super::parser::parse_all;
use super::scope::Scope;
use super::value::{BuiltinKind, Lambda, Value};

/// Default limit on nested evaluation
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// The Lisp interpreter
pub struct Interpreter {
    import_dir: PathBuf,
    max_depth: usize,
    depth: Cell<usize>,
    roller: RefCell<Box<dyn DieRoller>>,
}

/// Keeps the evaluation depth counter balanced
struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl Interpreter {
    /// Create an interpreter that resolves imports against `import_dir`
    pub fn new(import_dir: impl Into<PathBuf>) -> Self {
        Self {
            import_dir: import_dir.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            depth: Cell::new(0),
            roller: RefCell::new(Box::new(RandomRoller::new())),
        }
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Replace the die roller used by `roll`
    pub fn with_roller(mut self, roller: impl DieRoller + 'static) -> Self {
        self.roller = RefCell::new(Box::new(roller));
        self
    }

    /// Directory `import` paths are relative to
    pub fn import_dir(&self) -> &Path {
        &self.import_dir
    }

    /// Create a root scope populated with the standard library
    pub fn create_scope(&self) -> Rc<Scope> {
        let scope = Scope::root();
        operators::register_all(&scope);
        scope
    }

    /// Roll a dice expression with this interpreter's roller
    pub fn roll(&self, input: &str) -> Result<RollResult, DiceError> {
        let mut roller = self.roller.borrow_mut();
        dice::roll(input, roller.as_mut())
    }

    /// Parse and evaluate every expression in `source`, returning each result
    pub fn eval_source(&self, source: &str, scope: &Rc<Scope>) -> Vec<Value> {
        parse_all(&lex(source))
            .iter()
            .map(|expr| self.eval(expr, scope))
            .collect()
    }

    /// Evaluate a single expression in `scope`
    pub fn eval(&self, expr: &Value, scope: &Rc<Scope>) -> Value {
        if self.depth.get() >= self.max_depth {
            tracing::warn!(max_depth = self.max_depth, "evaluation depth exceeded");
            return Value::error(format!(
                "maximum evaluation depth of {} exceeded",
                self.max_depth
            ));
        }
        self.depth.set(self.depth.get() + 1);
        let _guard = DepthGuard(&self.depth);

        match expr {
            Value::Atom(_) => scope.find(expr),
            Value::List(items) => self.eval_list(expr, items, scope),
            _ => expr.clone(),
        }
    }

    fn eval_list(&self, expr: &Value, items: &[Value], scope: &Rc<Scope>) -> Value {
        let Some((head, args)) = items.split_first() else {
            return expr.clone();
        };

        let callee = match head {
            Value::Atom(_) => scope.find(head),
            Value::List(_) => self.eval(head, scope),
            other => other.clone(),
        };

        match &callee {
            Value::Atom(name) if name == "def" => self.define(args, scope),
            Value::Atom(name) if name == "lambda" => Self::lambda(args, scope),
            Value::Builtin(builtin) => match builtin.kind() {
                BuiltinKind::Form => builtin.invoke(args, self, scope),
                BuiltinKind::Function => {
                    let evaluated = self.eval_args(args, scope);
                    builtin.invoke(&evaluated, self, scope)
                }
            },
            Value::Lambda(lambda) => {
                let evaluated = self.eval_args(args, scope);
                self.apply(lambda, evaluated)
            }
            _ => expr.clone(),
        }
    }

    fn eval_args(&self, args: &[Value], scope: &Rc<Scope>) -> Vec<Value> {
        args.iter().map(|arg| self.eval(arg, scope)).collect()
    }

    /// `(def name expr)`
    fn define(&self, args: &[Value], scope: &Rc<Scope>) -> Value {
        let [name, expr] = args else {
            return Value::error("def requires a name and a value");
        };
        let value = self.eval(expr, scope);
        scope.define(name.clone(), value);
        name.clone()
    }

    /// `(lambda (params...) body...)`
    fn lambda(args: &[Value], scope: &Rc<Scope>) -> Value {
        let Some((Value::List(params), body)) = args.split_first() else {
            return Value::error("lambda requires a parameter list");
        };
        Value::Lambda(Rc::new(Lambda {
            params: params.clone(),
            body: body.to_vec(),
            scope: Rc::clone(scope),
        }))
    }

    /// Call a lambda with already evaluated arguments
    pub fn apply(&self, lambda: &Lambda, args: Vec<Value>) -> Value {
        if args.len() != lambda.params.len() {
            return Value::error(format!(
                "lambda expects {} arguments but received {}",
                lambda.params.len(),
                args.len()
            ));
        }

        let call_scope = lambda.scope.child();
        for (param, arg) in lambda.params.iter().zip(args) {
            call_scope.define(param.clone(), arg);
        }

        let mut result = Value::error("Lambda body needs at least one statement");
        for expr in &lambda.body {
            result = self.eval(expr, &call_scope);
        }
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(dir)
    }
}
