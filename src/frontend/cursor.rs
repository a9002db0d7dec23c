use crate::frontend::lexer::{Lexer, LexerError, Span, Spanned};
use crate::frontend::token::Token;

/// Peekable, rewindable view over a tokenized source.
///
/// Statements consume tokens up to the end of their statement (a `:`,
/// newline or end of input). The cursor never moves past the end of input,
/// so `next` at the end keeps returning `Eof`.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Spanned>,
    pos: usize,
}

static EOF: Token = Token::Eof;

impl TokenCursor {
    pub fn new(mut tokens: Vec<Spanned>) -> Self {
        if !matches!(tokens.last().map(|s| &s.token), Some(Token::Eof)) {
            let span = tokens
                .last()
                .map(|s| s.span.clone())
                .unwrap_or(Span { line: 1, col: 1 });
            tokens.push(Spanned {
                token: Token::Eof,
                span,
            });
        }
        Self { tokens, pos: 0 }
    }

    /// Tokenize `source` (comments removed) and position the cursor at its start.
    pub fn from_source(source: &str) -> Result<Self, LexerError> {
        let tokens = Lexer::new(source).tokenize_clean()?;
        Ok(Self::new(tokens))
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Token under the cursor, without consuming it.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|s| &s.token).unwrap_or(&EOF)
    }

    /// Source position of the token under the cursor.
    pub fn span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map(|s| s.span.clone())
            .unwrap_or(Span { line: 1, col: 1 })
    }

    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if !matches!(token, Token::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Un-consume the most recently consumed token.
    pub fn push_back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.peek(), Token::Ident(_))
    }

    /// Consume the next token if it is the keyword `text` (any case).
    pub fn assume(&mut self, text: &str) -> bool {
        if self.peek().is_keyword(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the next token if it equals `token`.
    pub fn assume_token(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.next();
            true
        } else {
            false
        }
    }

    pub fn end_of_statement(&self) -> bool {
        self.peek().ends_statement()
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    /// Skip any statement separators so the cursor sits on the next verb.
    pub fn skip_separators(&mut self) {
        while matches!(self.peek(), Token::Colon | Token::Newline) {
            self.pos += 1;
        }
    }

    /// Consume and return the rest of the current statement.
    pub fn rest_of_statement(&mut self) -> Vec<Token> {
        let mut rest = Vec::new();
        while !self.end_of_statement() {
            rest.push(self.next());
        }
        rest
    }

    /// Source-like text for the tokens in `start..end`.
    pub fn text_between(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len());
        self.tokens[start.min(end)..end]
            .iter()
            .map(|s| s.token.spelling())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(source: &str) -> TokenCursor {
        TokenCursor::from_source(source).unwrap()
    }

    #[test]
    fn test_next_and_push_back() {
        let mut c = cursor("RESUME fred");
        assert!(c.assume("resume"));
        assert_eq!(c.next(), Token::Ident("fred".to_string()));
        c.push_back();
        assert!(c.is_identifier());
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_assume_does_not_consume_on_mismatch() {
        let mut c = cursor("RANDOMIZE 42");
        assert!(!c.assume("TIMER"));
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_end_of_statement_at_separators() {
        let mut c = cursor("STEP : NEXT");
        c.next();
        assert!(c.end_of_statement());
        c.skip_separators();
        assert!(c.assume("NEXT"));
        assert!(c.end_of_statement());
        assert!(c.at_eof());
    }

    #[test]
    fn test_next_sticks_at_eof() {
        let mut c = cursor("");
        assert_eq!(c.next(), Token::Eof);
        assert_eq!(c.next(), Token::Eof);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_new_appends_missing_eof() {
        let c = TokenCursor::new(vec![Spanned {
            token: Token::Integer(1),
            span: Span { line: 3, col: 4 },
        }]);
        assert_eq!(c.tokens.len(), 2);
        assert!(matches!(c.tokens[1].token, Token::Eof));
    }

    #[test]
    fn test_rest_of_statement_and_text() {
        let mut c = cursor("SELECT a, b\nNEXT");
        let start = c.position();
        let rest = c.rest_of_statement();
        assert_eq!(rest.len(), 4);
        assert_eq!(c.text_between(start, c.position()), "SELECT a , b");
        assert!(matches!(c.peek(), Token::Newline));
    }
}
