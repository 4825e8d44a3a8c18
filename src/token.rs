use std::fmt::{self, Display};

use crate::value::Literal;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    pub(crate) literal: Option<Literal>,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Token {
    pub fn new<S: Into<String>>(
        kind: TokenKind,
        lexeme: S,
        literal: Option<Literal>,
        line: usize,
        column: usize,
    ) -> Self {
        Token { kind, lexeme: lexeme.into(), literal, line, column }
    }

    pub fn eof(line: usize, column: usize) -> Self {
        Token::new(TokenKind::EndOfFile, "", None, line, column)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Column just past the last character of the lexeme.
    pub(crate) fn end_column(&self) -> usize {
        self.column + self.lexeme.chars().count()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}' {}:{}", self.kind, self.lexeme, self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    LeftParen, RightParen, LeftBrace, RightBrace,
    Dot, Minus, Plus, Semicolon, Slash, Star,

    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    Identifier, String, Number,

    And, Class, Else, False, Fun, For, If, Null, Or,
    Print, Return, Super, This, True, Var, While,

    EndOfFile,
}

impl TokenKind {
    pub fn is_equality_operator(self) -> bool {
        matches!(self, TokenKind::BangEqual | TokenKind::EqualEqual)
    }

    pub fn is_comparison_operator(self) -> bool {
        use TokenKind::*;
        matches!(self, Greater | GreaterEqual | Less | LessEqual)
    }

    pub fn is_term_operator(self) -> bool {
        matches!(self, TokenKind::Minus | TokenKind::Plus)
    }

    pub fn is_factor_operator(self) -> bool {
        matches!(self, TokenKind::Slash | TokenKind::Star)
    }

    pub fn is_unary_operator(self) -> bool {
        matches!(self, TokenKind::Bang | TokenKind::Minus)
    }

    pub fn is_binary_operator(self) -> bool {
        self.is_equality_operator()
            || self.is_comparison_operator()
            || self.is_term_operator()
            || self.is_factor_operator()
    }

    pub fn is_literal(self) -> bool {
        use TokenKind::*;
        matches!(self, Number | String | True | False | Null)
    }
}
