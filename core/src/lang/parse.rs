use super::{
    ast,
    lex::Lexer,
    position::{Span, WithSpan},
    token::{self, Keyword, Token, TokenSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// =
    Assign,
    /// == !=
    Equality,
    /// < <= > >=
    Relational,
    /// + -
    Sum,
    /// * /
    Product,
    /// ! -
    Prefix,
    /// f(x)
    Call,
}

impl Precedence {
    /// Binding power of `token` when it appears in infix position.
    pub fn of(token: &token::Kind) -> Self {
        match token {
            token::Kind::Assign => Self::Assign,

            token::Kind::EqualEqual | token::Kind::BangEqual => Self::Equality,

            token::Kind::Less
            | token::Kind::LessEqual
            | token::Kind::Greater
            | token::Kind::GreaterEqual => Self::Relational,

            token::Kind::Plus | token::Kind::Minus => Self::Sum,

            token::Kind::Star | token::Kind::Slash => Self::Product,

            token::Kind::ParenLeft => Self::Call,

            token::Kind::Semicolon
            | token::Kind::Comma
            | token::Kind::ParenRight
            | token::Kind::BraceLeft
            | token::Kind::BraceRight
            | token::Kind::Bang
            | token::Kind::And
            | token::Kind::Or
            | token::Kind::Keyword(_)
            | token::Kind::Identifier
            | token::Kind::Integer
            | token::Kind::Eof
            | token::Kind::Illegal => Self::Lowest,
        }
    }
}

type PrefixFn<S> = fn(&mut Parser<S>) -> Option<ast::Expr>;
type InfixFn<S> = fn(&mut Parser<S>, ast::Expr) -> Option<ast::Expr>;

/// Precedence climbing parser over a pull-based token source.
pub struct Parser<S> {
    source: S,
    current: Token,
    peek: Token,
    errors: Vec<WithSpan<error::Kind>>,
}

/// Parse source text into a program.
///
/// # Returns
/// All parse errors if any occurred.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
pub fn parse(src: impl AsRef<str>) -> Result<ast::Program, Vec<WithSpan<error::Kind>>> {
    let mut parser = Parser::new(Lexer::new(src.as_ref()));
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        Ok(program)
    } else {
        Err(parser.errors)
    }
}

impl<S> Parser<S>
where
    S: TokenSource,
{
    pub fn new(mut source: S) -> Self {
        let current = source.next_token();
        let peek = source.next_token();
        Self {
            source,
            current,
            peek,
            errors: vec![],
        }
    }

    /// Messages of the errors encountered so far.
    /// If not empty the parsed program must not be evaluated.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn diagnostics(&self) -> &[WithSpan<error::Kind>] {
        &self.errors
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn parse_program(&mut self) -> ast::Program {
        let mut program = ast::Program::default();
        while !self.current.is(token::Kind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.advance();
        }
        program
    }
}

impl<S> Parser<S>
where
    S: TokenSource,
{
    fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        #[cfg(feature = "tracing")]
        tracing::trace!(current = ?self.current.kind, peek = ?self.peek.kind);
    }

    /// Advance if the peek token is of the expected kind,
    /// otherwise record an error.
    fn expect_peek(&mut self, expected: token::Kind) -> Option<()> {
        if self.peek.is(expected) {
            self.advance();
            Some(())
        } else {
            self.error(
                error::Kind::UnexpectedToken {
                    expected,
                    found: self.peek.kind,
                },
                self.peek.span,
            );
            None
        }
    }

    fn error(&mut self, kind: error::Kind, span: Span) {
        #[cfg(feature = "tracing")]
        tracing::debug!(%kind, %span, "parse error");
        self.errors.push(WithSpan::new(kind, span));
    }

    fn prefix_rule(kind: token::Kind) -> Option<PrefixFn<S>> {
        match kind {
            token::Kind::Identifier => Some(Self::parse_identifier),
            token::Kind::Integer => Some(Self::parse_integer),
            token::Kind::Keyword(Keyword::True | Keyword::False) => Some(Self::parse_bool),
            token::Kind::Minus | token::Kind::Bang => Some(Self::parse_prefix),
            token::Kind::ParenLeft => Some(Self::parse_group),
            _ => None,
        }
    }

    fn infix_rule(kind: token::Kind) -> Option<InfixFn<S>> {
        match kind {
            token::Kind::Plus
            | token::Kind::Minus
            | token::Kind::Star
            | token::Kind::Slash
            | token::Kind::EqualEqual
            | token::Kind::BangEqual
            | token::Kind::Less
            | token::Kind::LessEqual
            | token::Kind::Greater
            | token::Kind::GreaterEqual => Some(Self::parse_infix),
            token::Kind::Assign => Some(Self::parse_assign),
            token::Kind::ParenLeft => Some(Self::parse_call),
            _ => None,
        }
    }
}

// statements
impl<S> Parser<S>
where
    S: TokenSource,
{
    fn parse_statement(&mut self) -> Option<ast::Stmt> {
        match self.current.kind {
            token::Kind::Keyword(Keyword::Var) => Some(self.parse_var()?.into()),
            token::Kind::Keyword(Keyword::Func) => Some(std::rc::Rc::new(self.parse_func()?).into()),
            token::Kind::Keyword(Keyword::Return) => Some(self.parse_return()?.into()),
            token::Kind::Keyword(Keyword::If) => Some(self.parse_if()?.into()),
            token::Kind::BraceLeft => Some(self.parse_block()?.into()),
            _ => Some(self.parse_expr_statement()?.into()),
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    fn parse_var(&mut self) -> Option<ast::VarDecl> {
        let token = self.current.clone();
        self.expect_peek(token::Kind::Identifier)?;
        let name = ast::Identifier::from_token(self.current.clone());
        self.expect_peek(token::Kind::Assign)?;
        self.advance();
        let value = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(token::Kind::Semicolon)?;
        Some(ast::VarDecl { token, name, value })
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    fn parse_func(&mut self) -> Option<ast::FuncDecl> {
        let token = self.current.clone();
        self.expect_peek(token::Kind::Identifier)?;
        let name = ast::Identifier::from_token(self.current.clone());
        self.expect_peek(token::Kind::ParenLeft)?;

        let mut params = vec![];
        while !self.peek.is(token::Kind::ParenRight) {
            self.expect_peek(token::Kind::Identifier)?;
            params.push(ast::Identifier::from_token(self.current.clone()));
            // trailing comma is allowed
            if self.peek.is(token::Kind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_peek(token::Kind::ParenRight)?;
        self.expect_peek(token::Kind::BraceLeft)?;
        let body = self.parse_block()?;

        Some(ast::FuncDecl {
            token,
            name,
            params,
            body,
        })
    }

    fn parse_return(&mut self) -> Option<ast::ReturnStmt> {
        let token = self.current.clone();
        self.advance();
        let value = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(token::Kind::Semicolon)?;
        Some(ast::ReturnStmt { token, value })
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    fn parse_if(&mut self) -> Option<ast::IfStmt> {
        let token = self.current.clone();
        self.expect_peek(token::Kind::ParenLeft)?;
        self.advance();
        let condition = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(token::Kind::ParenRight)?;
        self.expect_peek(token::Kind::BraceLeft)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek.is(token::Kind::Keyword(Keyword::Else)) {
            self.advance();
            self.expect_peek(token::Kind::BraceLeft)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(ast::IfStmt {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    /// Parse statements up to the closing brace.
    /// Current token must be the opening brace.
    fn parse_block(&mut self) -> Option<ast::Block> {
        let token = self.current.clone();
        self.advance();

        let mut statements = vec![];
        while !self.current.is(token::Kind::BraceRight) {
            if self.current.is(token::Kind::Eof) {
                let span = Span::new(token.span.start, self.current.span.end);
                self.error(error::Kind::UnclosedBlock, span);
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }

        Some(ast::Block { token, statements })
    }

    fn parse_expr_statement(&mut self) -> Option<ast::ExprStmt> {
        let token = self.current.clone();
        let expr = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(token::Kind::Semicolon)?;
        Some(ast::ExprStmt { token, expr })
    }
}

// expressions
impl<S> Parser<S>
where
    S: TokenSource,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    fn parse_expr(&mut self, precedence: Precedence) -> Option<ast::Expr> {
        let Some(prefix) = Self::prefix_rule(self.current.kind) else {
            let kind = match self.current.kind {
                token::Kind::Illegal => error::Kind::IllegalToken(self.current.literal.clone()),
                kind => error::Kind::NoPrefixRule(kind),
            };
            self.error(kind, self.current.span);
            return None;
        };

        let mut expr = prefix(self)?;
        while !self.peek.is(token::Kind::Semicolon) && precedence < Precedence::of(&self.peek.kind)
        {
            let Some(infix) = Self::infix_rule(self.peek.kind) else {
                return Some(expr);
            };
            self.advance();
            expr = infix(self, expr)?;
        }

        Some(expr)
    }

    fn parse_identifier(&mut self) -> Option<ast::Expr> {
        Some(ast::Identifier::from_token(self.current.clone()).into())
    }

    fn parse_integer(&mut self) -> Option<ast::Expr> {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(ast::LitInteger { token, value }.into()),
            Err(_) => {
                self.error(error::Kind::InvalidInteger(token.literal), token.span);
                None
            }
        }
    }

    fn parse_bool(&mut self) -> Option<ast::Expr> {
        let token = self.current.clone();
        let value = token.is(token::Kind::Keyword(Keyword::True));
        Some(ast::LitBool { token, value }.into())
    }

    fn parse_prefix(&mut self) -> Option<ast::Expr> {
        let token = self.current.clone();
        let op = ast::OpPrefix::from_token(&token.kind)?;
        self.advance();
        let operand = self.parse_expr(Precedence::Prefix)?;
        Some(
            ast::ExprPrefix {
                token,
                op,
                operand: Box::new(operand),
            }
            .into(),
        )
    }

    fn parse_group(&mut self) -> Option<ast::Expr> {
        self.advance();
        let expr = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(token::Kind::ParenRight)?;
        Some(expr)
    }

    /// Left associative binary operator.
    fn parse_infix(&mut self, left: ast::Expr) -> Option<ast::Expr> {
        let token = self.current.clone();
        let op = ast::OpInfix::from_token(&token.kind)?;
        let precedence = Precedence::of(&token.kind);
        self.advance();
        let right = self.parse_expr(precedence)?;
        Some(
            ast::ExprInfix {
                token,
                op,
                left: Box::new(left),
                right: Box::new(right),
            }
            .into(),
        )
    }

    /// Right associative assignment.
    fn parse_assign(&mut self, left: ast::Expr) -> Option<ast::Expr> {
        let token = self.current.clone();
        let target = match left {
            ast::Expr::Identifier(target) => target,
            left => {
                let span = Span::new(left.token().span.start, token.span.end);
                self.error(error::Kind::InvalidAssignmentTarget(left.to_string()), span);
                return None;
            }
        };

        self.advance();
        let value = self.parse_expr(Precedence::Lowest)?;
        Some(
            ast::ExprAssign {
                token,
                target,
                value: Box::new(value),
            }
            .into(),
        )
    }

    /// Argument list of a call.
    /// Current token is the opening parenthesis.
    fn parse_call(&mut self, callee: ast::Expr) -> Option<ast::Expr> {
        let token = self.current.clone();
        let mut arguments = vec![];

        if self.peek.is(token::Kind::ParenRight) {
            self.advance();
        } else {
            self.advance();
            arguments.push(self.parse_expr(Precedence::Lowest)?);
            while self.peek.is(token::Kind::Comma) {
                self.advance();
                // trailing comma is allowed
                if self.peek.is(token::Kind::ParenRight) {
                    break;
                }
                self.advance();
                arguments.push(self.parse_expr(Precedence::Lowest)?);
            }
            self.expect_peek(token::Kind::ParenRight)?;
        }

        Some(
            ast::ExprCall {
                token,
                callee: Box::new(callee),
                arguments,
            }
            .into(),
        )
    }
}

pub mod error {
    use super::token;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum Kind {
        /// The next token was not the one required by the grammar.
        #[error("expected next token to be `{expected}`, found `{found}`")]
        UnexpectedToken {
            expected: token::Kind,
            found: token::Kind,
        },

        /// The token can not begin an expression.
        #[error("no prefix parse function for `{0}` found")]
        NoPrefixRule(token::Kind),

        /// Text that is not part of the language.
        #[error("illegal token `{0}`")]
        IllegalToken(String),

        /// Left side of `=` is not an identifier.
        #[error("cannot assign to expression `{0}`")]
        InvalidAssignmentTarget(String),

        /// Integer literal is out of the 64-bit signed range.
        #[error("could not parse `{0}` as a 64-bit integer")]
        InvalidInteger(String),

        /// Input ended before a block was closed.
        #[error("block was not closed")]
        UnclosedBlock,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lang::{ast::Render, lex};

    fn parse_ok(src: &str) -> ast::Program {
        match parse(src) {
            Ok(program) => program,
            Err(errors) => panic!("input should be valid: {errors:?}"),
        }
    }

    fn parse_err(src: &str) -> Vec<error::Kind> {
        let errors = parse(src).expect_err("input should be invalid");
        errors.into_iter().map(|err| err.value).collect()
    }

    #[test]
    fn parse_precedence() {
        let cases = [
            ("-a * b;", "((-a) * b);"),
            ("!-a;", "(!(-a));"),
            ("a + b + c;", "((a + b) + c);"),
            ("a + b - c;", "((a + b) - c);"),
            ("a * b * c;", "((a * b) * c);"),
            ("a * b / c;", "((a * b) / c);"),
            ("a + b / c;", "(a + (b / c));"),
            ("a + b * c;", "(a + (b * c));"),
            ("5 + 10 * -15;", "(5 + (10 * (-15)));"),
            ("-5 * 10 - -15;", "(((-5) * 10) - (-15));"),
            ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4));"),
            ("5 <= 4 != 3 >= 4;", "((5 <= 4) != (3 >= 4));"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5;", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));"),
            ("!true == false;", "((!true) == false);"),
            ("4 * (2 + 3);", "(4 * (2 + 3));"),
            ("(2 + 3) * 4;", "((2 + 3) * 4);"),
            ("-(5 + 5);", "(-(5 + 5));"),
            ("!(true == true);", "(!(true == true));"),
            ("a + add(b * c) + d;", "((a + add((b * c))) + d);"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));",
            ),
            ("-f(x);", "(-f(x));"),
        ];
        for (src, expected) in cases {
            let program = parse_ok(src);
            assert_eq!(program.render(), expected, "input: {src}");
        }
    }

    #[test]
    fn parse_assignment_right_associative() {
        let cases = [
            ("x = 2;", "(x = 2);"),
            ("foo = 2 * y;", "(foo = (2 * y));"),
            ("foo = bar = baz = 100;", "(foo = (bar = (baz = 100)));"),
            ("foo = bar = baz = x + 3;", "(foo = (bar = (baz = (x + 3))));"),
            ("a == b = c;", "(a == b)"),
        ];
        for (src, expected) in &cases[..4] {
            assert_eq!(parse_ok(src).render(), *expected);
        }

        let (src, target) = cases[4];
        let errors = parse_err(src);
        assert_eq!(errors[0], error::Kind::InvalidAssignmentTarget(target.to_string()));
    }

    #[test]
    fn parse_invalid_assignment_target() {
        let errors = parse_err("1 + a = 5;");
        assert_eq!(
            errors[0],
            error::Kind::InvalidAssignmentTarget("(1 + a)".to_string())
        );

        let errors = parse_err("f() = 1;");
        assert!(matches!(errors[0], error::Kind::InvalidAssignmentTarget(_)));
    }

    #[test]
    fn parse_var() {
        let program = parse_ok("var x = 5; var y = x * 2;");
        assert_eq!(program.statements.len(), 2);
        let ast::Stmt::Var(decl) = &program.statements[0] else {
            panic!("invalid statement");
        };
        assert_eq!(decl.name.name, "x");
        assert!(matches!(decl.value, ast::Expr::Integer(ast::LitInteger { value: 5, .. })));
        assert_eq!(program.statements[1].render(), "var y = (x * 2);");
    }

    #[test]
    fn parse_var_errors() {
        let errors = parse_err("var = 5;");
        assert_eq!(
            errors[0],
            error::Kind::UnexpectedToken {
                expected: token::Kind::Identifier,
                found: token::Kind::Assign
            }
        );

        let errors = parse_err("var x 5;");
        assert_eq!(
            errors[0],
            error::Kind::UnexpectedToken {
                expected: token::Kind::Assign,
                found: token::Kind::Integer
            }
        );

        let errors = parse_err("var x = 5");
        assert_eq!(
            errors[0],
            error::Kind::UnexpectedToken {
                expected: token::Kind::Semicolon,
                found: token::Kind::Eof
            }
        );
    }

    #[test]
    fn parse_func() {
        let program = parse_ok("func add(x, y) { return x + y; }");
        let ast::Stmt::Func(decl) = &program.statements[0] else {
            panic!("invalid statement");
        };
        assert_eq!(decl.name.name, "add");
        let params = decl
            .params
            .iter()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(params, vec!["x", "y"]);
        assert_eq!(decl.body.statements.len(), 1);
        assert_eq!(
            program.render(),
            "func add(x, y) { return (x + y); }"
        );

        let program = parse_ok("func noop() { }");
        assert_eq!(program.render(), "func noop() { }");

        let program = parse_ok("func trailing(a, b,) { a; }");
        let ast::Stmt::Func(decl) = &program.statements[0] else {
            panic!("invalid statement");
        };
        assert_eq!(decl.params.len(), 2);
    }

    #[test]
    fn parse_func_errors() {
        let errors = parse_err("func (x) { }");
        assert!(matches!(
            errors[0],
            error::Kind::UnexpectedToken {
                expected: token::Kind::Identifier,
                ..
            }
        ));

        let errors = parse_err("func f(1) { }");
        assert!(matches!(
            errors[0],
            error::Kind::UnexpectedToken {
                expected: token::Kind::Identifier,
                found: token::Kind::Integer
            }
        ));

        let errors = parse_err("func f(x) { return x;");
        assert!(errors.contains(&error::Kind::UnclosedBlock));
    }

    #[test]
    fn parse_return() {
        let program = parse_ok("return x;");
        let ast::Stmt::Return(stmt) = &program.statements[0] else {
            panic!("invalid statement");
        };
        assert!(matches!(stmt.value, ast::Expr::Identifier(_)));
        assert_eq!(stmt.token.kind, token::Kind::Keyword(Keyword::Return));
    }

    #[test]
    fn parse_if() {
        let program = parse_ok("if (x < y) { x; }");
        let ast::Stmt::If(stmt) = &program.statements[0] else {
            panic!("invalid statement");
        };
        assert_eq!(stmt.condition.render(), "(x < y)");
        assert_eq!(stmt.consequence.statements.len(), 1);
        assert!(stmt.alternative.is_none());

        let program = parse_ok("if (x < y) { x; } else { y; z; }");
        let ast::Stmt::If(stmt) = &program.statements[0] else {
            panic!("invalid statement");
        };
        let alternative = stmt.alternative.as_ref().expect("alternative to exist");
        assert_eq!(alternative.statements.len(), 2);
        assert_eq!(program.render(), "if ((x < y)) { x; } else { y; z; }");
    }

    #[test]
    fn parse_block_statement() {
        let program = parse_ok("{ var x = 1; x; }");
        let ast::Stmt::Block(block) = &program.statements[0] else {
            panic!("invalid statement");
        };
        assert_eq!(block.statements.len(), 2);
    }

    #[test]
    fn parse_call() {
        let program = parse_ok("add(1, 2 * 3, 4 + 5);");
        let ast::Stmt::Expr(ast::ExprStmt {
            expr: ast::Expr::Call(call),
            ..
        }) = &program.statements[0]
        else {
            panic!("invalid statement");
        };
        assert_eq!(call.callee.render(), "add");
        assert_eq!(call.arguments.len(), 3);

        assert_eq!(parse_ok("f();").render(), "f();");
        assert_eq!(parse_ok("f(a, b,);").render(), "f(a, b);");
        assert_eq!(parse_ok("make(1)(2);").render(), "make(1)(2);");
    }

    #[test]
    fn parse_literals() {
        let program = parse_ok("foobar; 5; true; false;");
        let rendered = program
            .statements
            .iter()
            .map(|stmt| stmt.render())
            .collect::<Vec<_>>();
        assert_eq!(rendered, vec!["foobar;", "5;", "true;", "false;"]);
    }

    #[test]
    fn parse_no_prefix_rule() {
        let errors = parse_err("*5;");
        assert_eq!(errors[0], error::Kind::NoPrefixRule(token::Kind::Star));

        let errors = parse_err("a && b;");
        assert_eq!(
            errors[0],
            error::Kind::UnexpectedToken {
                expected: token::Kind::Semicolon,
                found: token::Kind::And
            }
        );

        let errors = parse_err("x = #;");
        assert_eq!(errors[0], error::Kind::IllegalToken("#".to_string()));
    }

    #[test]
    fn parse_integer_overflow() {
        let errors = parse_err("9223372036854775808;");
        assert_eq!(
            errors[0],
            error::Kind::InvalidInteger("9223372036854775808".to_string())
        );

        let program = parse_ok("9223372036854775807;");
        assert_eq!(program.render(), "9223372036854775807;");
    }

    #[test]
    fn parse_errors_are_best_effort() {
        let mut parser = Parser::new(Lexer::new("var x 1; var = 2; 3;"));
        let program = parser.parse_program();
        assert!(parser.errors().len() >= 2);
        assert!(
            program
                .statements
                .iter()
                .any(|stmt| stmt.render() == "3;")
        );
    }

    #[test]
    fn error_messages_carry_span() {
        let mut parser = Parser::new(Lexer::new("var x = ;"));
        parser.parse_program();
        let errors = parser.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "no prefix parse function for `;` found at 8..9");
        assert_eq!(
            parser.diagnostics(),
            &[WithSpan::new(
                error::Kind::NoPrefixRule(token::Kind::Semicolon),
                Span::new(8, 9)
            )]
        );
    }

    #[test]
    fn parse_from_buffered_tokens() {
        let tokens = lex::tokenize("1 + 2;");
        let mut parser = Parser::new(token::Tokens::new(tokens));
        let program = parser.parse_program();
        assert!(parser.errors().is_empty());
        assert_eq!(program.render(), "(1 + 2);");
    }

    #[test]
    fn round_trip() {
        let src = "
            var x = 1 + 2 * 3;
            func makeAdder(x) { func inner(y) { return x + y; } return inner; }
            var add5 = makeAdder(5);
            if (add5(3) >= 8) { x = -x; } else { !true; }
            if (x == 1) { }
            { var scoped = f(a, b,)(c); }
            a = b = !c;
        ";
        let first = parse_ok(src).render();
        let second = parse_ok(&first).render();
        assert_eq!(first, second);
    }
}
