use super::position::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    Var,
    Func,
    If,
    Else,
    Return,
    True,
    False,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Var => "var",
            Keyword::Func => "func",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Return => "return",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }

    pub fn from_str(value: impl AsRef<str>) -> Option<Self> {
        match value.as_ref() {
            "var" => Some(Self::Var),
            "func" => Some(Self::Func),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "return" => Some(Self::Return),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }
}

/// Kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    Semicolon,
    Comma,
    ParenLeft,
    ParenRight,
    BraceLeft,
    BraceRight,

    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    BangEqual,
    And,
    Or,

    Keyword(Keyword),
    Identifier,
    Integer,

    /// End of input.
    Eof,
    /// Character sequence that is not part of the language.
    Illegal,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Kind::Semicolon => ";",
            Kind::Comma => ",",
            Kind::ParenLeft => "(",
            Kind::ParenRight => ")",
            Kind::BraceLeft => "{",
            Kind::BraceRight => "}",
            Kind::Assign => "=",
            Kind::Plus => "+",
            Kind::Minus => "-",
            Kind::Star => "*",
            Kind::Slash => "/",
            Kind::Bang => "!",
            Kind::Less => "<",
            Kind::Greater => ">",
            Kind::LessEqual => "<=",
            Kind::GreaterEqual => ">=",
            Kind::EqualEqual => "==",
            Kind::BangEqual => "!=",
            Kind::And => "&&",
            Kind::Or => "||",
            Kind::Keyword(word) => word.as_str(),
            Kind::Identifier => "IDENT",
            Kind::Integer => "INTEGER",
            Kind::Eof => "EOF",
            Kind::Illegal => "ILLEGAL",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: Kind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: Kind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// End of input marker positioned at `span`.
    pub fn eof(span: Span) -> Self {
        Self::new(Kind::Eof, "", span)
    }

    pub fn is(&self, kind: Kind) -> bool {
        self.kind == kind
    }
}

/// Pull-based supply of tokens for the parser.
///
/// Once exhausted, an implementation must keep returning [`Kind::Eof`].
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Buffered token stream.
pub struct Tokens {
    iter: std::vec::IntoIter<Token>,
    end: Span,
}

impl Tokens {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|token| token.span).unwrap_or_default();
        Self {
            iter: tokens.into_iter(),
            end,
        }
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl TokenSource for Tokens {
    fn next_token(&mut self) -> Token {
        self.iter.next().unwrap_or_else(|| Token::eof(self.end))
    }
}

/// Tokens produced by another pipeline stage.
/// Blocks until the producer sends a token; a disconnected channel is the end of input.
impl TokenSource for crossbeam::channel::Receiver<Token> {
    fn next_token(&mut self) -> Token {
        self.recv().unwrap_or_else(|_| Token::eof(Span::default()))
    }
}
