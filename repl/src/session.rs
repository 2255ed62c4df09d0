use corrosion_core::lang::{Interpreter, Parser, Render, lex::Lexer};
use std::io::{self, BufRead, Write};

const APP_NAME: &str = "Corrosion";

/// Evaluates input against a single global scope and reports to `out`.
pub struct Session<W> {
    interpreter: Interpreter,
    out: W,
    print_ast: bool,
}

impl<W> Session<W>
where
    W: Write,
{
    pub fn new(out: W, print_ast: bool) -> Self {
        Self {
            interpreter: Interpreter::new(),
            out,
            print_ast,
        }
    }

    /// Parse and evaluate `input`, printing every value other than `null`.
    /// Nothing is evaluated if parsing fails.
    ///
    /// # Returns
    /// Number of parse errors.
    pub fn eval(&mut self, input: &str) -> io::Result<usize> {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        let errors = parser.errors();
        if !errors.is_empty() {
            writeln!(self.out, "parse returned {} errors", errors.len())?;
            for (index, err) in errors.iter().enumerate() {
                writeln!(self.out, "errors[{index}]: {err}")?;
            }
            return Ok(errors.len());
        }

        if self.print_ast && !program.statements.is_empty() {
            writeln!(self.out, "{}", program.render())?;
        }
        for value in self.interpreter.run_program(&program) {
            writeln!(self.out, "{value}")?;
        }
        Ok(0)
    }

    /// Evaluate `input` line by line until it is exhausted.
    pub fn repl(&mut self, input: impl BufRead, prompt: &str) -> io::Result<()> {
        writeln!(self.out, "Welcome to {APP_NAME}")?;
        writeln!(self.out)?;
        writeln!(self.out, "Press Ctrl+D (^D) to exit")?;
        self.prompt(prompt)?;

        for line in input.lines() {
            let line = line?;
            self.eval(&line)?;
            self.prompt(prompt)?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Exiting {APP_NAME}")
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()
    }
}
