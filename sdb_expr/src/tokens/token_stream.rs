//! Index-addressable token stream
//!
//! The evaluator works on closed index ranges `[p, q]`, so the stream is a
//! plain owned vector with span helpers rather than a cursor. A fresh stream
//! is built for every evaluation call.

use crate::{tokens::token::*, utils::Span};

/// Ordered, mutable sequence of significant tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create a new token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Create an empty stream with room for `capacity` tokens
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Token> {
        self.tokens.get_mut(index)
    }

    /// Kind of the token at `index`
    pub fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|token| token.kind)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Token> {
        self.tokens.iter_mut()
    }

    /// All token kinds in order
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }

    /// Source span covering tokens `p..=q`, or an empty span at the
    /// nearest token when the range is empty or out of bounds
    pub fn span_range(&self, p: usize, q: usize) -> Span {
        match (self.tokens.get(p), self.tokens.get(q)) {
            (Some(first), Some(last)) if p <= q => first.span.merge(last.span),
            (Some(first), _) => Span::point(first.span.start),
            (None, _) => self
                .tokens
                .last()
                .map(|token| Span::point(token.span.end))
                .unwrap_or_default(),
        }
    }

    /// Span of the single token at `index`
    pub fn span_at(&self, index: usize) -> Option<Span> {
        self.tokens.get(index).map(|token| token.span)
    }

    /// One-line listing of the stream for diagnostics
    pub fn diagnostic(&self) -> String {
        let parts: Vec<String> = self.tokens.iter().map(|token| token.to_string()).collect();
        format!("[{}]", parts.join(" "))
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl std::fmt::Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.diagnostic())
    }
}

/// Builder for constructing token streams in tests
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    offset: usize,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token; spans are laid out back to back
    pub fn push(mut self, kind: TokenKind, text: &str) -> Self {
        let span = Span::new(self.offset, self.offset + text.len());
        self.offset = span.end;
        self.tokens.push(Token::new(kind, text, span));
        self
    }

    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenStream {
        TokenStreamBuilder::new()
            .push(TokenKind::LParen, "(")
            .push(TokenKind::Number, "12")
            .push(TokenKind::Plus, "+")
            .push(TokenKind::Register, "$sp")
            .push(TokenKind::RParen, ")")
            .build()
    }

    #[test]
    fn test_builder_spans() {
        let stream = sample();
        assert_eq!(stream.len(), 5);
        assert_eq!(stream.span_at(1), Some(Span::new(1, 3)));
        assert_eq!(stream.span_at(3), Some(Span::new(4, 7)));
    }

    #[test]
    fn test_span_range() {
        let stream = sample();
        assert_eq!(stream.span_range(1, 3), Span::new(1, 7));
        assert_eq!(stream.span_range(3, 2), Span::point(4));
        assert_eq!(stream.span_range(9, 9), Span::point(8));
        assert_eq!(TokenStream::default().span_range(0, 0), Span::point(0));
    }

    #[test]
    fn test_mutation_in_place() {
        let mut stream = sample();
        if let Some(token) = stream.get_mut(2) {
            token.kind = TokenKind::Minus;
        }
        assert_eq!(stream.kind_at(2), Some(TokenKind::Minus));
    }

    #[test]
    fn test_diagnostic() {
        assert_eq!(sample().diagnostic(), "[( number(12) + register($sp) )]");
    }
}
