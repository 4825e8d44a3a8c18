use crate::{
    error::{Error, ErrorKind, Result},
    state::ExecutionState,
    token::{Token, TokenKind},
    value::Literal,
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::{iter, str::Chars};
use tracing::{debug, trace};

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "null" => TokenKind::Null,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Scans one line of source, appending its tokens and errors to `state`.
///
/// An unknown character is reported and skipped. A malformed string or
/// number literal is reported and ends the line; tokens found before it
/// are kept.
pub fn scan(line: &str, line_number: usize, state: &mut ExecutionState) {
    let line = line.trim_end_matches('\n');
    let mut tokens = Vec::new();

    for result in LineScanner::new(line, line_number) {
        match result {
            Ok(token) => {
                trace!(%token, "scanned");
                tokens.push(token);
            }
            Err(e) => {
                let halts = e.kind() == ErrorKind::Syntax;
                state.push_error(e);
                if halts {
                    debug!(line = line_number, "stopped scanning line");
                    break;
                }
            }
        }
    }

    state.extend_tokens(tokens);
}

/// Scans a whole source text line by line into a single state, closing the
/// token sequence with an end-of-input token.
pub fn scan_source(source: &str) -> ExecutionState {
    let mut state = ExecutionState::new();
    let mut end = (1, 1);

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        scan(line, line_number, &mut state);
        end = (line_number, line.chars().count() + 1);
    }

    state.extend_tokens(iter::once(Token::eof(end.0, end.1)));
    state
}

type Lexeme = (TokenKind, Option<Literal>);

struct LineScanner<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    line: usize,
    // Column of the last character consumed, 1-based.
    column: usize,
}

impl <'a> Iterator for LineScanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.lexeme_buffer.clear();
            let next_char = self.advance()?;
            let start_column = self.column;

            if let Some(scanned) = self.next_token_kind(next_char) {
                return Some(scanned.map(|(kind, literal)| Token {
                    kind,
                    lexeme: self.lexeme_buffer.clone(),
                    literal,
                    line: self.line,
                    column: start_column,
                }));
            }
        }
    }
}

impl <'a> LineScanner<'a> {
    fn new(src: &'a str, line: usize) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            line,
            column: 0,
        }
    }

    fn next_token_kind(&mut self, next_char: char) -> Option<Result<Lexeme>> {
        use TokenKind::*;
        let simple = |kind| Some(Ok((kind, None)));
        match next_char {
            '(' => simple(LeftParen),
            ')' => simple(RightParen),
            '{' => simple(LeftBrace),
            '}' => simple(RightBrace),
            '.' => simple(Dot),
            '-' => simple(Minus),
            '+' => simple(Plus),
            ';' => simple(Semicolon),
            '*' => simple(Star),
            '!' => simple(if self.does_next_match('=') { BangEqual } else { Bang }),
            '=' => simple(if self.does_next_match('=') { EqualEqual } else { Equal }),
            '<' => simple(if self.does_next_match('=') { LessEqual } else { Less }),
            '>' => simple(if self.does_next_match('=') { GreaterEqual } else { Greater }),
            '/' => {
                if self.does_next_match('/') { // comment runs to the end of the line
                    self.advance_while(|_| true);
                    None
                } else {
                    simple(Slash)
                }
            },
            ' ' | '\r' | '\t' | '\n' => None,
            '"' => Some(self.extract_string()),
            c if c.is_ascii_digit() => Some(self.extract_number()),
            c if can_start_identifier(&c) => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::lexical(
                self.line,
                self.column,
                format!("Invalid Character {:?}", c),
            ))),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.src.next()?;
        self.column += 1;
        self.lexeme_buffer.push(c);
        Some(c)
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.src.peek() {
            Some(next) if c == *next => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn extract_string(&mut self) -> Result<Lexeme> {
        let mut value = String::new();
        loop {
            match self.advance() {
                None => break,
                Some('"') => return Ok((TokenKind::String, Some(Literal::String(value)))),
                Some('\\') => match self.advance() {
                    None => break,
                    Some(escaped) => value.push(unescape(escaped)),
                },
                Some(c) => value.push(c),
            }
        }
        Err(Error::malformed(self.line, self.column, "UNTERMINATED STRING"))
    }

    fn extract_number(&mut self) -> Result<Lexeme> {
        self.advance_while(|c| c.is_ascii_digit() || *c == '.');

        let text = self.lexeme_buffer.as_str();
        let number = if text.contains('.') {
            text.parse::<f32>().ok().filter(|n| n.is_finite())
        } else {
            text.parse::<i64>().ok().map(|n| n as f32)
        };

        match number {
            Some(n) => Ok((TokenKind::Number, Some(Literal::Number(n)))),
            None => Err(Error::malformed(
                self.line,
                self.column,
                format!("INVALID NUMBER: {}", text),
            )),
        }
    }

    fn extract_identifier(&mut self) -> Lexeme {
        self.advance_while(is_part_of_valid_identifier);

        let text = self.lexeme_buffer.as_str();
        match KEYWORDS.get(text) {
            Some(keyword) => (*keyword, None),
            None => (TokenKind::Identifier, None),
        }
    }

    fn advance_while(&mut self, should_continue: impl Fn(&char) -> bool) {
        while self.src.peek().map_or(false, |c| should_continue(c)) {
            self.advance();
        }
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
