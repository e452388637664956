//! Lexical scopes

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

/// A set of bindings chained to an optional parent scope
#[derive(Default)]
pub struct Scope {
    parent: Option<Rc<Scope>>,
    bindings: RefCell<HashMap<Value, Value>>,
}

impl Scope {
    /// Create an empty scope with no parent
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Create a new scope whose lookups fall back to `self`
    pub fn child(self: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(Rc::clone(self)),
            bindings: RefCell::default(),
        })
    }

    /// Bind `key` in this scope, shadowing any outer binding
    pub fn define(&self, key: Value, value: Value) {
        self.bindings.borrow_mut().insert(key, value);
    }

    /// Bind a named atom in this scope
    pub fn define_atom(&self, name: &str, value: Value) {
        self.define(Value::atom(name), value);
    }

    /// Rebind `key` in the nearest scope that already holds it, otherwise
    /// define it here
    pub fn set(&self, key: Value, value: Value) {
        match self.owner_of(&key) {
            Some(owner) => {
                owner.bindings.borrow_mut().insert(key, value);
            }
            None => self.define(key, value),
        }
    }

    fn owner_of(&self, key: &Value) -> Option<&Scope> {
        if self.bindings.borrow().contains_key(key) {
            Some(self)
        } else {
            self.parent.as_deref().and_then(|p| p.owner_of(key))
        }
    }

    /// Look up the nearest binding for `key`
    pub fn lookup(&self, key: &Value) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(key) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(key))
    }

    /// Resolve `key`, falling back to the key itself when unbound
    pub fn find(&self, key: &Value) -> Value {
        self.lookup(key).unwrap_or_else(|| key.clone())
    }

    /// Whether `key` is bound in this scope or any parent
    pub fn contains(&self, key: &Value) -> bool {
        self.owner_of(key).is_some()
    }

    /// Keys bound directly in this scope
    pub fn local_keys(&self) -> Vec<Value> {
        self.bindings.borrow().keys().cloned().collect()
    }
}
