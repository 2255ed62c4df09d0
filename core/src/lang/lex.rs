use super::{
    position::{BytePos, Span},
    token::{Keyword, Kind, Token, TokenSource},
};
use std::{iter, str};

/// Tokenize the entire input.
/// The result always ends with a single [`Kind::Eof`] token.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, fields(src = %src.as_ref())))]
pub fn tokenize(src: impl AsRef<str>) -> Vec<Token> {
    let mut lexer = Lexer::new(src.as_ref());
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        let eof = token.is(Kind::Eof);
        tokens.push(token);
        if eof {
            break;
        }
    }
    tokens
}

struct Scanner<'a> {
    /// Iterator over src characters and their byte offsets.
    iter: iter::Peekable<str::CharIndices<'a>>,

    /// Byte offset one past the last consumed character.
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            iter: src.char_indices().peekable(),
            pos: 0,
        }
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.iter.peek().map(|(_, ch)| *ch)
    }

    /// Consume the next character if it is equal to the expected one.
    pub fn next_if_eq(&mut self, expected: char) -> Option<char> {
        let (idx, ch) = self.iter.next_if(|(_, ch)| *ch == expected)?;
        self.pos = idx + ch.len_utf8();
        Some(ch)
    }
}

impl iter::Iterator for Scanner<'_> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        let (idx, ch) = self.iter.next()?;
        #[cfg(feature = "tracing")]
        tracing::trace!(?ch);

        self.pos = idx + ch.len_utf8();
        Some(ch)
    }
}

/// Pull-based scanner.
///
/// Produces one token per call to [`TokenSource::next_token`].
pub struct Lexer<'a> {
    src: &'a str,
    it: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            it: Scanner::new(src),
        }
    }

    /// Validates if the character may start an identifier.
    /// Valid characters are alphabetic (`a-z`, `A-Z`) and underscore (`_`).
    fn is_ident_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    /// Validates if the character is valid within an identifier.
    fn is_ident_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }
}

impl Lexer<'_> {
    fn next_while<F>(&mut self, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut chars = String::new();
        while let Some(ch) = self.it.peek() {
            if !predicate(ch) {
                break;
            }
            if let Some(ch) = self.it.next() {
                chars.push(ch);
            }
        }
        chars
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            self.next_while(char::is_whitespace);
            let mut lookahead = self.it.iter.clone();
            let is_comment = matches!(
                (lookahead.next(), lookahead.next()),
                (Some((_, '/')), Some((_, '/')))
            );
            if !is_comment {
                return;
            }
            self.next_while(|ch| ch != '\n');
        }
    }

    /// Match a one or two character operator.
    fn either(&mut self, second: char, matched: Kind, unmatched: Kind) -> Kind {
        if self.it.next_if_eq(second).is_some() {
            matched
        } else {
            unmatched
        }
    }

    /// Match a two character operator whose first character is not valid alone.
    fn pair(&mut self, second: char, matched: Kind) -> Kind {
        if self.it.next_if_eq(second).is_some() {
            matched
        } else {
            Kind::Illegal
        }
    }

    fn match_next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let pos_start = self.it.iter.peek().map(|(idx, _)| *idx)?;
        let ch = self.it.next()?;

        let kind = match ch {
            ';' => Kind::Semicolon,
            ',' => Kind::Comma,
            '(' => Kind::ParenLeft,
            ')' => Kind::ParenRight,
            '{' => Kind::BraceLeft,
            '}' => Kind::BraceRight,
            '+' => Kind::Plus,
            '-' => Kind::Minus,
            '*' => Kind::Star,
            '/' => Kind::Slash,
            '=' => self.either('=', Kind::EqualEqual, Kind::Assign),
            '!' => self.either('=', Kind::BangEqual, Kind::Bang),
            '<' => self.either('=', Kind::LessEqual, Kind::Less),
            '>' => self.either('=', Kind::GreaterEqual, Kind::Greater),
            '&' => self.pair('&', Kind::And),
            '|' => self.pair('|', Kind::Or),

            ch if ch.is_ascii_digit() => {
                let rest = self.next_while(|ch| ch.is_ascii_digit());
                let literal = iter::once(ch).chain(rest.chars()).collect::<String>();
                return Some(Token::new(
                    Kind::Integer,
                    literal,
                    Span::new(pos_start, self.it.pos),
                ));
            }

            ch if Self::is_ident_start(ch) => {
                let rest = self.next_while(Self::is_ident_char);
                let literal = iter::once(ch).chain(rest.chars()).collect::<String>();
                let kind = match Keyword::from_str(&literal) {
                    Some(word) => Kind::Keyword(word),
                    None => Kind::Identifier,
                };
                return Some(Token::new(kind, literal, Span::new(pos_start, self.it.pos)));
            }

            _ => Kind::Illegal,
        };

        let span = Span::new(pos_start, self.it.pos);
        let literal = match kind {
            Kind::Illegal => self.slice(span),
            kind => kind.to_string(),
        };
        Some(Token::new(kind, literal, span))
    }

    /// Source text covered by `span`.
    fn slice(&self, span: Span) -> String {
        self.src
            .get(*span.start..*span.end)
            .unwrap_or_default()
            .to_string()
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        match self.match_next_token() {
            Some(token) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(kind = ?token.kind, literal = %token.literal);
                token
            }
            None => Token::eof(Span::at(BytePos(self.it.pos))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(src: &str) -> Vec<Kind> {
        tokenize(src).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn tokenize_empty() {
        assert_eq!(kinds(""), vec![Kind::Eof]);
        assert_eq!(kinds(" \t\r\n"), vec![Kind::Eof]);
    }

    #[test]
    fn tokenize_delimiters_and_operators() {
        let src = "; , ( ) { } = + - * / ! < > <= >= == != && ||";
        assert_eq!(
            kinds(src),
            vec![
                Kind::Semicolon,
                Kind::Comma,
                Kind::ParenLeft,
                Kind::ParenRight,
                Kind::BraceLeft,
                Kind::BraceRight,
                Kind::Assign,
                Kind::Plus,
                Kind::Minus,
                Kind::Star,
                Kind::Slash,
                Kind::Bang,
                Kind::Less,
                Kind::Greater,
                Kind::LessEqual,
                Kind::GreaterEqual,
                Kind::EqualEqual,
                Kind::BangEqual,
                Kind::And,
                Kind::Or,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn tokenize_two_character_operators_without_spaces() {
        assert_eq!(
            kinds("a<=b==!c"),
            vec![
                Kind::Identifier,
                Kind::LessEqual,
                Kind::Identifier,
                Kind::EqualEqual,
                Kind::Bang,
                Kind::Identifier,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn tokenize_keywords() {
        let src = "var func if else return true false";
        assert_eq!(
            kinds(src),
            vec![
                Kind::Keyword(Keyword::Var),
                Kind::Keyword(Keyword::Func),
                Kind::Keyword(Keyword::If),
                Kind::Keyword(Keyword::Else),
                Kind::Keyword(Keyword::Return),
                Kind::Keyword(Keyword::True),
                Kind::Keyword(Keyword::False),
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn tokenize_identifier_and_integer() {
        let tokens = tokenize("var foo_1 = 1234;");
        assert_eq!(tokens[1].kind, Kind::Identifier);
        assert_eq!(tokens[1].literal, "foo_1");
        assert_eq!(tokens[1].span, Span::new(4, 9));
        assert_eq!(tokens[3].kind, Kind::Integer);
        assert_eq!(tokens[3].literal, "1234");
        assert_eq!(tokens[3].span, Span::new(12, 16));
    }

    #[test]
    fn tokenize_illegal() {
        let tokens = tokenize("a & b # c");
        assert_eq!(tokens[1].kind, Kind::Illegal);
        assert_eq!(tokens[1].literal, "&");
        assert_eq!(tokens[3].kind, Kind::Illegal);
        assert_eq!(tokens[3].literal, "#");
    }

    #[test]
    fn tokenize_skips_comments() {
        let src = "1; // ignored ; tokens\n2; //";
        assert_eq!(
            kinds(src),
            vec![
                Kind::Integer,
                Kind::Semicolon,
                Kind::Integer,
                Kind::Semicolon,
                Kind::Eof
            ]
        );
    }

    #[test]
    fn eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, Kind::Identifier);
        assert_eq!(lexer.next_token().kind, Kind::Eof);
        assert_eq!(lexer.next_token().kind, Kind::Eof);
    }
}
