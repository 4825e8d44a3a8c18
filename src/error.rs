use std::fmt::{self, Display};
use std::result;

use thiserror::Error;

use crate::token::{Token, TokenKind};

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A character the scanner has no rule for.
    Lexical,
    /// A malformed literal or a token sequence the grammar rejects.
    Syntax,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "Lexical"),
            ErrorKind::Syntax => write!(f, "Syntax"),
        }
    }
}

/// Scanner errors point into the source line; parser errors point at a token.
#[derive(Clone, Debug, PartialEq)]
enum Location {
    Source,
    Token(String),
    End,
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("[line {line}, column {column}] {kind} error{}: {message}", describe(.location))]
pub struct Error {
    kind: ErrorKind,
    line: usize,
    column: usize,
    message: String,
    location: Location,
}

impl Error {
    pub fn lexical<S: Into<String>>(line: usize, column: usize, message: S) -> Error {
        Error {
            kind: ErrorKind::Lexical,
            line,
            column,
            message: message.into(),
            location: Location::Source,
        }
    }

    /// A malformed literal, found while scanning.
    pub fn malformed<S: Into<String>>(line: usize, column: usize, message: S) -> Error {
        Error {
            kind: ErrorKind::Syntax,
            line,
            column,
            message: message.into(),
            location: Location::Source,
        }
    }

    pub fn syntactic<S: Into<String>>(token: &Token, message: S) -> Error {
        let location = if token.kind == TokenKind::EndOfFile {
            Location::End
        } else {
            Location::Token(token.lexeme.clone())
        };
        Error {
            kind: ErrorKind::Syntax,
            line: token.line,
            column: token.column,
            message: message.into(),
            location,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The lexeme the parser stopped at, if this came from the parser.
    pub fn lexeme(&self) -> Option<&str> {
        match &self.location {
            Location::Token(lexeme) => Some(lexeme),
            Location::End => Some(""),
            Location::Source => None,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.location == Location::End
    }
}

fn describe(location: &Location) -> String {
    match location {
        Location::Source => String::new(),
        Location::Token(lexeme) => format!(" at '{}'", lexeme),
        Location::End => " at end".to_string(),
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        use std::io::ErrorKind::*;
        std::io::Error::new(InvalidData, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_errors_have_no_location_suffix() {
        let e = Error::lexical(3, 7, "Invalid Character '#'");
        assert_eq!("[line 3, column 7] Lexical error: Invalid Character '#'", e.to_string());
        assert_eq!(None, e.lexeme());
    }

    #[test]
    fn parser_errors_name_the_token() {
        let token = Token::new(TokenKind::Plus, "+", None, 1, 5);
        let e = Error::syntactic(&token, "Expected an expression.");
        assert_eq!("[line 1, column 5] Syntax error at '+': Expected an expression.", e.to_string());
        assert_eq!(Some("+"), e.lexeme());
    }

    #[test]
    fn parser_errors_at_end_of_input() {
        let e = Error::syntactic(&Token::eof(2, 1), "Expected an expression.");
        assert!(e.is_at_end());
        assert_eq!("[line 2, column 1] Syntax error at end: Expected an expression.", e.to_string());
    }
}
