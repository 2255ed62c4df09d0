//! Lexer, parser and tree-walking evaluator for a small C-like language.
//!
//! # Inspiration
//! + [Crafting Interpreters](https://craftinginterpreters.com)
//! + [Writing An Interpreter In Go](https://interpreterbook.com)

pub mod ast;
pub mod env;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod position;
pub mod token;
pub mod value;

pub use ast::{Program, Render};
pub use env::Environment;
pub use eval::Eval;
pub use parse::Parser;
pub use value::{Error, ErrorKind, Value};

/// Parse and evaluate `input` in a fresh environment.
///
/// The environment is cleared afterwards, so a function in the result
/// no longer resolves global names.
///
/// # Returns
/// The value of the program, or the parse error messages.
pub fn run(input: impl AsRef<str>) -> Result<Value, Vec<String>> {
    let program = parse::parse(input).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    })?;

    let env = Environment::new();
    let value = eval::eval(&program, &env);
    env.clear();
    Ok(value)
}

/// Evaluates programs against a persistent global scope.
///
/// Each top level statement is evaluated on its own, so an error in one
/// statement does not prevent the following statements from running.
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global scope.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Parse and evaluate `input`.
    /// Nothing is evaluated if parsing fails.
    ///
    /// # Returns
    /// Values of the statements that produced one, including errors.
    ///
    /// # Errors
    /// Parse error messages.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, input)))]
    pub fn run(&mut self, input: impl AsRef<str>) -> Result<Vec<Value>, Vec<String>> {
        let mut parser = Parser::new(lex::Lexer::new(input.as_ref()));
        let program = parser.parse_program();
        let errors = parser.errors();
        if !errors.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(count = errors.len(), "parse failed");
            return Err(errors);
        }

        Ok(self.run_program(&program))
    }

    /// Evaluate each statement of `program` in the global scope.
    /// A `return` ends the program with its value.
    pub fn run_program(&mut self, program: &Program) -> Vec<Value> {
        let mut values = vec![];
        for stmt in program.statements.iter() {
            let (value, done) = match stmt.eval(&self.env) {
                Value::Return(value) => (*value, true),
                value => (value, false),
            };

            #[cfg(feature = "tracing")]
            if let Value::Error(err) = &value {
                tracing::debug!(kind = ?err.kind, %err, "statement failed");
            }
            if !value.is_null() {
                values.push(value);
            }
            if done {
                break;
            }
        }
        values
    }
}

impl Drop for Interpreter {
    /// Closures stored in the global scope may capture a call scope that
    /// refers back to it.
    fn drop(&mut self) {
        self.env.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn run_returns_program_value() {
        assert_eq!(run("var x = 2; x * 21;"), Ok(Value::Integer(42)));
        assert_eq!(run("var x = 2;"), Ok(Value::Null));
    }

    #[test]
    fn run_reports_parse_errors() {
        let errors = run("var = 1;").expect_err("input is invalid");
        assert_eq!(
            errors[0],
            "expected next token to be `IDENT`, found `=` at 4..5"
        );
    }

    #[test]
    fn interpreter_keeps_global_scope() {
        let mut interpreter = Interpreter::new();
        assert_eq!(interpreter.run("var x = 3;"), Ok(vec![]));
        assert_eq!(interpreter.run("x + 1;"), Ok(vec![Value::Integer(4)]));
        assert_eq!(interpreter.env().names(), vec!["x".to_string()]);
    }

    #[test]
    fn interpreter_continues_after_error() {
        let mut interpreter = Interpreter::new();
        let values = interpreter
            .run("var x = 3; if (true) { var x = 5; } x;")
            .expect("input to be valid");
        assert_eq!(values.len(), 2);
        assert_eq!(
            values[0],
            Value::Error(Error::already_defined("x"))
        );
        assert_eq!(values[1], Value::Integer(3));
    }

    #[test]
    fn interpreter_unwraps_top_level_return() {
        let mut interpreter = Interpreter::new();
        let values = interpreter.run("return 5;").expect("input to be valid");
        assert_eq!(values, vec![Value::Integer(5)]);
    }

    #[test]
    fn interpreter_stops_at_top_level_return() {
        let mut interpreter = Interpreter::new();
        let values = interpreter
            .run("var x = 1; return x + 4; x = 6; x;")
            .expect("input to be valid");
        assert_eq!(values, vec![Value::Integer(5)]);
        assert_eq!(interpreter.env().get("x"), Some(Value::Integer(1)));
        assert_eq!(run("return 5; 6;"), Ok(Value::Integer(5)));

        let values = interpreter
            .run("if (x == 1) { return true; } false;")
            .expect("input to be valid");
        assert_eq!(values, vec![Value::Boolean(true)]);
    }

    #[test]
    fn run_releases_global_scope() {
        let Ok(Value::Function(f)) = run("func f() { return 1; } f;") else {
            panic!("f to be a function");
        };
        assert!(f.env.names().is_empty());
    }

    #[test]
    fn interpreter_skips_evaluation_on_parse_error() {
        let mut interpreter = Interpreter::new();
        let errors = interpreter
            .run("var x = 1; var y 2;")
            .expect_err("input is invalid");
        assert_eq!(errors.len(), 1);
        assert!(!interpreter.env().contains("x"));
    }

    #[test]
    fn interpreter_releases_closures_on_drop() {
        let mut interpreter = Interpreter::new();
        interpreter
            .run("func f() { return 1; }")
            .expect("input to be valid");
        let env = interpreter.env().clone();
        drop(interpreter);
        assert!(env.names().is_empty());
    }
}
