use super::{ast, env::Environment};
use std::{fmt, rc::Rc};

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);

/// Result of evaluating a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    /// Produced by statements that have no value.
    Null,
    Error(Error),
    /// Control flow marker produced by `return`.
    /// Unwrapped at the function call boundary.
    Return(Box<Value>),
    Function(Function),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::Null => "NULL",
            Self::Error(_) => "ERROR",
            Self::Return(_) => "RETURN",
            Self::Function(_) => "FUNCTION",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Strip a `Return` marker.
    pub fn unwrap_return(self) -> Self {
        match self {
            Self::Return(value) => *value,
            value => value,
        }
    }

    /// Human readable rendering.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Self {
        Self::Error(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
            Self::Error(err) => write!(f, "ERROR: {err}"),
            Self::Return(value) => value.fmt(f),
            Self::Function(func) => func.fmt(f),
        }
    }
}

/// A function closed over the scope it was declared in.
#[derive(Clone)]
pub struct Function {
    pub decl: Rc<ast::FuncDecl>,
    pub env: Environment,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.decl.name.name
    }

    pub fn params(&self) -> &[ast::Identifier] {
        &self.decl.params
    }

    pub fn body(&self) -> &ast::Block {
        &self.decl.body
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.decl, &other.decl) && self.env.ptr_eq(&other.env)
    }
}

// The captured scope may hold this function, so it is not printed.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("params", &self.decl.params_list())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func({}) {}", self.decl.params_list(), self.decl.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Identifier is not bound in any reachable scope.
    UndefinedIdentifier,
    /// Assignment to a name that was never declared.
    UndefinedVariable,
    /// Declaration of a name that is already reachable.
    AlreadyDefined,
    /// Operator applied to operands of the wrong type.
    TypeMismatch,
    DivisionByZero,
    /// `if` condition did not evaluate to a boolean.
    NonBooleanCondition,
    /// Ordering comparison between booleans.
    BooleanOrdering,
    /// Comparison between values of different types.
    MixedTypeComparison,
    NotAFunction,
    /// Call with a different number of arguments than parameters.
    ArgumentCount,
}

/// Evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn undefined_identifier(name: &str) -> Self {
        Self::new(
            ErrorKind::UndefinedIdentifier,
            format!("undefined identifier {name:?}"),
        )
    }

    pub fn undefined_variable(name: &str) -> Self {
        Self::new(
            ErrorKind::UndefinedVariable,
            format!("undefined variable {name:?}"),
        )
    }

    pub fn already_defined(name: &str) -> Self {
        Self::new(
            ErrorKind::AlreadyDefined,
            format!("identifier {name:?} already defined"),
        )
    }

    pub fn prefix_type_mismatch(expr: &ast::ExprPrefix, operand: &Value) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!(
                "invalid operand type {} for operator {} in expression {expr}",
                operand.type_name(),
                expr.op.as_str(),
            ),
        )
    }

    pub fn infix_type_mismatch(expr: &ast::ExprInfix, left: &Value, right: &Value) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!(
                "invalid operand types {} {} {} in expression {expr}",
                left.type_name(),
                expr.op.as_str(),
                right.type_name(),
            ),
        )
    }

    pub fn division_by_zero(expr: &ast::ExprInfix) -> Self {
        Self::new(
            ErrorKind::DivisionByZero,
            format!("divide by zero error in expression {expr}"),
        )
    }

    pub fn non_boolean_condition(condition: &ast::Expr, value: &Value) -> Self {
        Self::new(
            ErrorKind::NonBooleanCondition,
            format!(
                "condition must be BOOLEAN, got {} from {condition}",
                value.type_name()
            ),
        )
    }

    pub fn boolean_ordering(expr: &ast::ExprInfix) -> Self {
        Self::new(
            ErrorKind::BooleanOrdering,
            format!("cannot order BOOLEAN values in expression {expr}"),
        )
    }

    pub fn mixed_type_comparison(expr: &ast::ExprInfix, left: &Value, right: &Value) -> Self {
        Self::new(
            ErrorKind::MixedTypeComparison,
            format!(
                "mixed type comparison {} {} {} in expression {expr}",
                left.type_name(),
                expr.op.as_str(),
                right.type_name(),
            ),
        )
    }

    pub fn not_a_function(callee: &ast::Expr, value: &Value) -> Self {
        Self::new(
            ErrorKind::NotAFunction,
            format!("{callee} is not a function, got {}", value.type_name()),
        )
    }

    pub fn argument_count(function: &Function, got: usize) -> Self {
        Self::new(
            ErrorKind::ArgumentCount,
            format!(
                "wrong number of arguments to {}: expected {}, got {got}",
                function.name(),
                function.params().len(),
            ),
        )
    }
}
