use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    expr::Expr,
    token::*,
    value::Literal,
};

const EQUALITY_TOKENS: &[TokenKind] = &[
    TokenKind::BangEqual,
    TokenKind::EqualEqual,
];

const COMPARISON_TOKENS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];

const TERM_TOKENS: &[TokenKind] = &[
    TokenKind::Minus,
    TokenKind::Plus,
];

const FACTOR_TOKENS: &[TokenKind] = &[
    TokenKind::Slash,
    TokenKind::Star,
];

const UNARY_TOKENS: &[TokenKind] = &[
    TokenKind::Bang,
    TokenKind::Minus,
];

// Deepest run of unary operators or parentheses accepted before giving up.
const MAX_NESTING: usize = 256;

// Starts rejected under `StartPolicy::Legacy`.
const LEGACY_REJECTED_STARTS: &[TokenKind] = &[
    TokenKind::EqualEqual,
    TokenKind::Plus,
    TokenKind::Dot,
    TokenKind::Slash,
    TokenKind::Semicolon,
];

/// Owned tokens plus a cursor. The stream ends at the first `EndOfFile`
/// token; past that, `peek` keeps returning it.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    eof: Token,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.iter().position(|t| t.kind == TokenKind::EndOfFile) {
            Some(end) => {
                tokens.truncate(end + 1);
                tokens.remove(end)
            }
            None => match tokens.last() {
                Some(last) => Token::eof(last.line, last.end_column()),
                None => Token::eof(1, 1),
            },
        };
        TokenStream { tokens, position: 0, eof }
    }

    pub fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    pub fn next(&mut self) -> Token {
        match self.tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                token.clone()
            }
            None => self.eof.clone(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}

/// Which tokens may open an expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StartPolicy {
    /// Anything that can begin a primary or unary expression, an
    /// identifier, or the end of input.
    Grammar,
    /// Only refuses `==`, `+`, `.`, `/` and `;`.
    Legacy,
}

impl Default for StartPolicy {
    fn default() -> Self {
        StartPolicy::Grammar
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParserConfig {
    pub start_policy: StartPolicy,
}

/// Parses a whole token stream as one expression.
pub fn parse<S: Into<TokenStream>>(tokens: S) -> Result<Expr> {
    Parser::new(tokens).parse()
}

pub struct Parser {
    tokens: TokenStream,
    config: ParserConfig,
    depth: usize,
}

impl Parser {
    pub fn new<S: Into<TokenStream>>(tokens: S) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config<S: Into<TokenStream>>(tokens: S, config: ParserConfig) -> Self {
        Parser { tokens: tokens.into(), config, depth: 0 }
    }

    /// Parses one expression and requires every token to be used.
    pub fn parse(&mut self) -> Result<Expr> {
        debug!(tokens = self.tokens.remaining(), "parsing expression");
        let e = self.expression()?;

        if self.tokens.remaining() > 0 {
            return Err(Error::syntactic(
                self.tokens.peek(),
                "Unexpected tokens after expression; parenthesize sub-expressions.",
            ));
        }

        Ok(e)
    }

    fn expression(&mut self) -> Result<Expr> {
        self.check_start()?;
        self.equality()
    }

    fn check_start(&self) -> Result<()> {
        let first = self.tokens.peek();
        let allowed = match self.config.start_policy {
            StartPolicy::Grammar => {
                first.kind.is_literal()
                    || first.kind.is_unary_operator()
                    || matches!(
                        first.kind,
                        TokenKind::Identifier | TokenKind::LeftParen | TokenKind::EndOfFile
                    )
            }
            StartPolicy::Legacy => !LEGACY_REJECTED_STARTS.contains(&first.kind),
        };

        if allowed {
            Ok(())
        } else {
            Err(Error::syntactic(first, "Invalid start of expression."))
        }
    }

    fn equality(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::comparison,
            EQUALITY_TOKENS,
            TokenKind::is_equality_operator
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::term,
            COMPARISON_TOKENS,
            TokenKind::is_comparison_operator
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::factor,
            TERM_TOKENS,
            TokenKind::is_term_operator
        )
    }

    fn factor(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::unary,
            FACTOR_TOKENS,
            TokenKind::is_factor_operator
        )
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(token) = self.match_any(UNARY_TOKENS) {
            debug_assert!(token.kind.is_unary_operator());
            let right = Box::new(self.nested(Self::unary)?);
            Ok(Expr::new_unary(token, right))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let kind = self.tokens.peek().kind;
        match kind {
            TokenKind::True => {
                self.tokens.next();
                Ok(Expr::new_literal(true.into()))
            },
            TokenKind::False => {
                self.tokens.next();
                Ok(Expr::new_literal(false.into()))
            },
            TokenKind::Null => {
                self.tokens.next();
                Ok(Expr::new_literal(Literal::Null))
            },
            TokenKind::Number | TokenKind::String => {
                let token = self.tokens.next();
                match &token.literal {
                    Some(value) => Ok(Expr::new_literal(value.clone())),
                    None => Err(Error::syntactic(&token, "Literal token without a value.")),
                }
            },
            TokenKind::LeftParen => {
                self.tokens.next();
                let expression = Box::new(self.nested(Self::expression)?);
                self.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
                Ok(Expr::new_grouping(expression))
            },
            _ => Err(Error::syntactic(self.tokens.peek(), "Expected an expression.")),
        }
    }

    fn nested(&mut self, parse: impl Fn(&mut Self) -> Result<Expr>) -> Result<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(Error::syntactic(self.tokens.peek(), "Expression nested too deeply."));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn check_next(&self, kind: TokenKind) -> bool {
        let next = self.tokens.peek().kind;
        next != TokenKind::EndOfFile && next == kind
    }

    fn consume(&mut self, kind: TokenKind, error_msg: &str) -> Result<Token> {
        if let Some(token) = self.match_single(kind) {
            Ok(token)
        } else {
            Err(Error::syntactic(self.tokens.peek(), error_msg))
        }
    }

    fn match_binary_precedence_with_tokens(
        &mut self,
        parse: impl Fn(&mut Self) -> Result<Expr>,
        kinds: &[TokenKind],
        is_level_operator: fn(TokenKind) -> bool,
    ) -> Result<Expr> {
        let mut e = parse(self)?;

        while let Some(token) = self.match_any(kinds) {
            debug_assert!(is_level_operator(token.kind));
            let right = Box::new(parse(self)?);
            e = Expr::new_binary(Box::new(e), token, right)
        }

        Ok(e)
    }

    fn match_single(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check_next(kind) {
            let token = self.tokens.next();
            trace!(%token, "matched");
            Some(token)
        } else {
            None
        }
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|k| self.match_single(*k))
    }
}
