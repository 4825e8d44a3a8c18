use crate::{
    error::Error,
    parser::TokenStream,
    token::Token,
};

/// Tokens and errors gathered for one unit of input (a prompt line or a
/// whole file). Entries are only ever appended; the caller resets the
/// state between units.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExecutionState {
    errors: Vec<Error>,
    tokens: Vec<Token>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, e: Error) {
        self.errors.push(e);
    }

    pub fn extend_tokens<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        self.tokens.extend(tokens);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        self.errors.clear();
        self.tokens.clear();
    }

    pub fn token_stream(&self) -> TokenStream {
        TokenStream::new(self.tokens.clone())
    }

    pub fn into_token_stream(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn appends_keep_order() {
        let mut state = ExecutionState::new();
        state.extend_tokens(vec![Token::new(TokenKind::Plus, "+", None, 1, 1)]);
        state.extend_tokens(vec![Token::new(TokenKind::Star, "*", None, 2, 1)]);
        state.push_error(Error::lexical(1, 2, "first"));
        state.push_error(Error::lexical(2, 2, "second"));

        let kinds: Vec<_> = state.tokens().iter().map(Token::kind).collect();
        assert_eq!(vec![TokenKind::Plus, TokenKind::Star], kinds);
        assert_eq!("first", state.errors()[0].message());
        assert_eq!("second", state.errors()[1].message());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = ExecutionState::new();
        state.extend_tokens(vec![Token::new(TokenKind::Plus, "+", None, 1, 1)]);
        state.push_error(Error::lexical(1, 2, "bad"));
        state.reset();
        assert!(!state.has_errors());
        assert!(state.tokens().is_empty());
    }
}
