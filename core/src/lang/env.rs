use super::{
    ast,
    value::{Error, Function, Value},
};
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

/// Handle to a lexical scope.
///
/// Cloning the handle shares the scope. A scope references its parent, never its children.
#[derive(Clone, Default)]
pub struct Environment(Rc<Scope>);

#[derive(Default)]
struct Scope {
    store: RefCell<HashMap<String, Binding>>,
    outer: Option<Environment>,
}

enum Binding {
    Value(Value),
    /// Function closed over the scope that holds this binding.
    /// The scope is restored from the handle used to reach it, so the
    /// binding does not own its own scope.
    Closure(Rc<ast::FuncDecl>),
}

impl Binding {
    /// Binding of `value` in `scope`.
    fn new(value: Value, scope: &Environment) -> Self {
        match value {
            Value::Function(function) if function.env.ptr_eq(scope) => {
                Self::Closure(function.decl)
            }
            value => Self::Value(value),
        }
    }

    fn value(&self, scope: &Environment) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Closure(decl) => Value::Function(Function {
                decl: Rc::clone(decl),
                env: scope.clone(),
            }),
        }
    }
}

impl Environment {
    /// Create a top level scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope nested in this one.
    pub fn child_scope(&self) -> Self {
        Self(Rc::new(Scope {
            store: RefCell::default(),
            outer: Some(self.clone()),
        }))
    }

    pub fn outer(&self) -> Option<&Environment> {
        self.0.outer.as_ref()
    }

    /// Look up `name` in this scope, then in the enclosing ones.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.0.store.borrow().get(name) {
            return Some(binding.value(self));
        }
        self.outer()?.get(name)
    }

    /// If `name` is bound in this or any enclosing scope.
    pub fn contains(&self, name: &str) -> bool {
        self.0.store.borrow().contains_key(name)
            || self.outer().is_some_and(|outer| outer.contains(name))
    }

    /// Bind `name` in this scope, replacing any existing binding in this scope.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Value {
        let binding = Binding::new(value.clone(), self);
        self.0.store.borrow_mut().insert(name.into(), binding);
        value
    }

    /// Overwrite the binding of `name` in the nearest scope that has one.
    ///
    /// # Errors
    /// + `UndefinedVariable` if no reachable scope binds `name`.
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, Error> {
        if let Some(slot) = self.0.store.borrow_mut().get_mut(name) {
            *slot = Binding::new(value.clone(), self);
            return Ok(value);
        }

        match self.outer() {
            Some(outer) => outer.assign(name, value),
            None => Err(Error::undefined_variable(name)),
        }
    }

    /// Remove every binding in this scope.
    /// Used to release closures that capture a descendant of the scope they are stored in.
    pub fn clear(&self) {
        let bindings = self.0.store.take();
        drop(bindings);
    }

    /// Names bound directly in this scope.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.0.store.borrow().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Number of enclosing scopes.
    pub fn depth(&self) -> usize {
        self.outer().map_or(0, |outer| outer.depth() + 1)
    }

    /// If both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Values may be closures that capture this scope, so only names are printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}
