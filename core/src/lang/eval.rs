use super::{
    ast::{self, OpArithmetic, OpEquality, OpInfix, OpPrefix, OpRelational},
    env::Environment,
    value::{Error, Function, Value},
};
use std::rc::Rc;

/// Return the error from the enclosing evaluation if `value` is one,
/// otherwise produce `value`.
macro_rules! propagate {
    ($value:expr) => {
        match $value {
            Value::Error(err) => return Value::Error(err),
            value => value,
        }
    };
}

/// Node that can be evaluated against an environment.
pub trait Eval {
    fn eval(&self, env: &Environment) -> Value;
}

/// Evaluate `node` in `env`.
///
/// Declarations and assignments mutate `env` or the scopes derived from it.
pub fn eval<N>(node: &N, env: &Environment) -> Value
where
    N: Eval + ?Sized,
{
    node.eval(env)
}

impl Eval for ast::Program {
    /// The value of the last statement.
    /// A top level `return` ends the program with its value.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, fields(statements = self.statements.len())))]
    fn eval(&self, env: &Environment) -> Value {
        eval_sequence(&self.statements, env).unwrap_return()
    }
}

impl Eval for ast::Block {
    /// Evaluated in a new scope.
    fn eval(&self, env: &Environment) -> Value {
        eval_sequence(&self.statements, &env.child_scope())
    }
}

impl Eval for ast::Stmt {
    fn eval(&self, env: &Environment) -> Value {
        match self {
            ast::Stmt::Block(block) => block.eval(env),
            ast::Stmt::Var(decl) => eval_var(decl, env),
            ast::Stmt::Func(decl) => eval_func(decl, env),
            ast::Stmt::Return(stmt) => {
                let value = propagate!(stmt.value.eval(env));
                Value::Return(Box::new(value))
            }
            ast::Stmt::If(stmt) => eval_if(stmt, env),
            ast::Stmt::Expr(stmt) => stmt.expr.eval(env),
        }
    }
}

impl Eval for ast::Expr {
    fn eval(&self, env: &Environment) -> Value {
        match self {
            ast::Expr::Identifier(ident) => match env.get(&ident.name) {
                Some(value) => value,
                None => Error::undefined_identifier(&ident.name).into(),
            },
            ast::Expr::Integer(lit) => Value::Integer(lit.value),
            ast::Expr::Bool(lit) => Value::from(lit.value),
            ast::Expr::Prefix(expr) => eval_prefix(expr, env),
            ast::Expr::Infix(expr) => eval_infix(expr, env),
            ast::Expr::Assign(expr) => {
                let value = propagate!(expr.value.eval(env));
                env.assign(&expr.target.name, value)
                    .unwrap_or_else(Value::Error)
            }
            ast::Expr::Call(call) => eval_call(call, env),
        }
    }
}

/// Evaluate statements in order, stopping at the first `Error` or `Return`.
///
/// # Returns
/// The value of the last statement evaluated.
fn eval_sequence(statements: &[ast::Stmt], env: &Environment) -> Value {
    let mut result = Value::Null;
    for stmt in statements {
        result = stmt.eval(env);
        if matches!(result, Value::Error(_) | Value::Return(_)) {
            #[cfg(feature = "tracing")]
            tracing::trace!(stmt = %stmt, result = %result, "sequence interrupted");
            return result;
        }
    }
    result
}

fn eval_var(decl: &ast::VarDecl, env: &Environment) -> Value {
    let value = propagate!(decl.value.eval(env));
    let name = &decl.name.name;
    if env.contains(name) {
        return Error::already_defined(name).into();
    }
    env.define(name.clone(), value);
    Value::Null
}

fn eval_func(decl: &Rc<ast::FuncDecl>, env: &Environment) -> Value {
    let function = Function {
        decl: Rc::clone(decl),
        env: env.clone(),
    };
    env.define(decl.name.name.clone(), Value::Function(function));
    Value::Null
}

fn eval_if(stmt: &ast::IfStmt, env: &Environment) -> Value {
    match propagate!(stmt.condition.eval(env)) {
        Value::Boolean(true) => stmt.consequence.eval(env),
        Value::Boolean(false) => match &stmt.alternative {
            Some(alternative) => alternative.eval(env),
            None => Value::Null,
        },
        value => Error::non_boolean_condition(&stmt.condition, &value).into(),
    }
}

fn eval_prefix(expr: &ast::ExprPrefix, env: &Environment) -> Value {
    let operand = propagate!(expr.operand.eval(env));
    match (expr.op, &operand) {
        (OpPrefix::Minus, Value::Integer(value)) => Value::Integer(value.wrapping_neg()),
        (OpPrefix::Not, Value::Boolean(value)) => Value::from(!value),
        _ => Error::prefix_type_mismatch(expr, &operand).into(),
    }
}

fn eval_infix(expr: &ast::ExprInfix, env: &Environment) -> Value {
    let left = propagate!(expr.left.eval(env));
    let right = propagate!(expr.right.eval(env));
    match expr.op {
        OpInfix::Arithmetic(op) => eval_arithmetic(expr, op, left, right),
        OpInfix::Equality(op) => eval_equality(expr, op, left, right),
        OpInfix::Relational(op) => eval_relational(expr, op, left, right),
    }
}

/// Integer arithmetic, wrapping on overflow.
fn eval_arithmetic(expr: &ast::ExprInfix, op: OpArithmetic, left: Value, right: Value) -> Value {
    let (Value::Integer(lhs), Value::Integer(rhs)) = (&left, &right) else {
        return Error::infix_type_mismatch(expr, &left, &right).into();
    };

    let value = match op {
        OpArithmetic::Add => lhs.wrapping_add(*rhs),
        OpArithmetic::Subtract => lhs.wrapping_sub(*rhs),
        OpArithmetic::Multiply => lhs.wrapping_mul(*rhs),
        OpArithmetic::Divide => {
            if *rhs == 0 {
                return Error::division_by_zero(expr).into();
            }
            lhs.wrapping_div(*rhs)
        }
    };
    Value::Integer(value)
}

fn eval_equality(expr: &ast::ExprInfix, op: OpEquality, left: Value, right: Value) -> Value {
    let equal = match (&left, &right) {
        (Value::Integer(lhs), Value::Integer(rhs)) => lhs == rhs,
        (Value::Boolean(lhs), Value::Boolean(rhs)) => lhs == rhs,
        _ if left.type_name() != right.type_name() => {
            return Error::mixed_type_comparison(expr, &left, &right).into();
        }
        _ => return Error::infix_type_mismatch(expr, &left, &right).into(),
    };

    match op {
        OpEquality::Equal => Value::from(equal),
        OpEquality::NotEqual => Value::from(!equal),
    }
}

fn eval_relational(expr: &ast::ExprInfix, op: OpRelational, left: Value, right: Value) -> Value {
    let ord = match (&left, &right) {
        (Value::Integer(lhs), Value::Integer(rhs)) => lhs.cmp(rhs),
        (Value::Boolean(_), Value::Boolean(_)) => {
            return Error::boolean_ordering(expr).into();
        }
        _ if left.type_name() != right.type_name() => {
            return Error::mixed_type_comparison(expr, &left, &right).into();
        }
        _ => return Error::infix_type_mismatch(expr, &left, &right).into(),
    };

    let result = match op {
        OpRelational::Less => ord.is_lt(),
        OpRelational::LessEqual => ord.is_le(),
        OpRelational::Greater => ord.is_gt(),
        OpRelational::GreaterEqual => ord.is_ge(),
    };
    Value::from(result)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, fields(callee = %call.callee)))]
fn eval_call(call: &ast::ExprCall, env: &Environment) -> Value {
    let function = match propagate!(call.callee.eval(env)) {
        Value::Function(function) => function,
        value => return Error::not_a_function(&call.callee, &value).into(),
    };

    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in call.arguments.iter() {
        arguments.push(propagate!(argument.eval(env)));
    }
    if arguments.len() != function.params().len() {
        return Error::argument_count(&function, arguments.len()).into();
    }

    // lexical scoping: the call scope extends the declaration scope, not the caller's
    let scope = function.env.child_scope();
    for (param, argument) in function.params().iter().zip(arguments) {
        scope.define(param.name.clone(), argument);
    }

    match eval_sequence(&function.body().statements, &scope) {
        Value::Return(value) => *value,
        err @ Value::Error(_) => err,
        _ => Value::Null,
    }
}
