//! Syntax tree.
//!
//! Every node keeps the token it was built from and renders (via [`fmt::Display`])
//! to a canonical, fully parenthesized form that parses back to the same tree.
use super::token::{self, Token};
use std::{fmt, rc::Rc};

/// Canonical textual form of a node.
pub trait Render: fmt::Display {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for Program {}
impl Render for Stmt {}
impl Render for Block {}
impl Render for Expr {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statements = self
            .statements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        f.write_str(&statements.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Stmt {
    Block(Block),
    Var(VarDecl),
    Func(Rc<FuncDecl>),
    Return(ReturnStmt),
    If(IfStmt),
    Expr(ExprStmt),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(stmt) => stmt.fmt(f),
            Stmt::Var(stmt) => stmt.fmt(f),
            Stmt::Func(stmt) => stmt.fmt(f),
            Stmt::Return(stmt) => stmt.fmt(f),
            Stmt::If(stmt) => stmt.fmt(f),
            Stmt::Expr(stmt) => stmt.fmt(f),
        }
    }
}

/// `{ ... }`
/// Evaluated in its own scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for stmt in self.statements.iter() {
            write!(f, "{stmt} ")?;
        }
        f.write_str("}")
    }
}

/// `var name = value;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub token: Token,
    pub name: Identifier,
    pub value: Expr,
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var {} = {};", self.name, self.value)
    }
}

/// `func name(params) { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub token: Token,
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Block,
}

impl FuncDecl {
    /// Parameter list as written, e.g. `x, y`.
    pub fn params_list(&self) -> String {
        self.params
            .iter()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FuncDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func {}({}) {}", self.name, self.params_list(), self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Expr,
}

impl fmt::Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return {};", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
    pub token: Token,
    pub condition: Expr,
    pub consequence: Block,
    pub alternative: Option<Block>,
}

impl fmt::Display for IfStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprStmt {
    pub token: Token,
    pub expr: Expr,
}

impl fmt::Display for ExprStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Expr {
    Identifier(Identifier),
    Integer(LitInteger),
    Bool(LitBool),
    Prefix(ExprPrefix),
    Infix(ExprInfix),
    Assign(ExprAssign),
    Call(ExprCall),
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(expr) => &expr.token,
            Expr::Integer(expr) => &expr.token,
            Expr::Bool(expr) => &expr.token,
            Expr::Prefix(expr) => &expr.token,
            Expr::Infix(expr) => &expr.token,
            Expr::Assign(expr) => &expr.token,
            Expr::Call(expr) => &expr.token,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(expr) => expr.fmt(f),
            Expr::Integer(expr) => expr.fmt(f),
            Expr::Bool(expr) => expr.fmt(f),
            Expr::Prefix(expr) => expr.fmt(f),
            Expr::Infix(expr) => expr.fmt(f),
            Expr::Assign(expr) => expr.fmt(f),
            Expr::Call(expr) => expr.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn from_token(token: Token) -> Self {
        let name = token.literal.clone();
        Self { token, name }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitInteger {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for LitInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitBool {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for LitBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpPrefix {
    /// `-`
    Minus,
    /// `!`
    Not,
}

impl OpPrefix {
    pub fn from_token(token: &token::Kind) -> Option<Self> {
        match token {
            token::Kind::Minus => Some(Self::Minus),
            token::Kind::Bang => Some(Self::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Not => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprPrefix {
    pub token: Token,
    pub op: OpPrefix,
    pub operand: Box<Expr>,
}

impl fmt::Display for ExprPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.op.as_str(), self.operand)
    }
}

/// `+ - * /`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpArithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// `== !=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpEquality {
    Equal,
    NotEqual,
}

/// `< <= > >=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpRelational {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

/// Binary operator, grouped by the family whose type rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum OpInfix {
    Arithmetic(OpArithmetic),
    Equality(OpEquality),
    Relational(OpRelational),
}

impl OpInfix {
    pub fn from_token(token: &token::Kind) -> Option<Self> {
        let op: Self = match token {
            token::Kind::Plus => OpArithmetic::Add.into(),
            token::Kind::Minus => OpArithmetic::Subtract.into(),
            token::Kind::Star => OpArithmetic::Multiply.into(),
            token::Kind::Slash => OpArithmetic::Divide.into(),
            token::Kind::EqualEqual => OpEquality::Equal.into(),
            token::Kind::BangEqual => OpEquality::NotEqual.into(),
            token::Kind::Less => OpRelational::Less.into(),
            token::Kind::LessEqual => OpRelational::LessEqual.into(),
            token::Kind::Greater => OpRelational::Greater.into(),
            token::Kind::GreaterEqual => OpRelational::GreaterEqual.into(),
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arithmetic(OpArithmetic::Add) => "+",
            Self::Arithmetic(OpArithmetic::Subtract) => "-",
            Self::Arithmetic(OpArithmetic::Multiply) => "*",
            Self::Arithmetic(OpArithmetic::Divide) => "/",
            Self::Equality(OpEquality::Equal) => "==",
            Self::Equality(OpEquality::NotEqual) => "!=",
            Self::Relational(OpRelational::Less) => "<",
            Self::Relational(OpRelational::LessEqual) => "<=",
            Self::Relational(OpRelational::Greater) => ">",
            Self::Relational(OpRelational::GreaterEqual) => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprInfix {
    pub token: Token,
    pub op: OpInfix,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl fmt::Display for ExprInfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.as_str(), self.right)
    }
}

/// `target = value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprAssign {
    pub token: Token,
    pub target: Identifier,
    pub value: Box<Expr>,
}

impl fmt::Display for ExprAssign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} = {})", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprCall {
    pub token: Token,
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl fmt::Display for ExprCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "{}({})", self.callee, arguments.join(", "))
    }
}
