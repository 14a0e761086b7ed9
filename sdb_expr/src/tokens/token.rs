//! Token kinds and matched-token values
//!
//! Every operator has a dedicated kind. The two context-sensitive kinds,
//! `Deref` and `Neg`, are never produced by a lexical rule; the
//! disambiguation pass rewrites `Star` and `Minus` into them.
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammar terminal and operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // === OPERANDS ===
    /// Decimal literal (`[0-9]+`)
    Number,
    /// Hexadecimal literal (`0x…`)
    Hex,
    /// Register reference (`$sp`, `$a0`, …)
    Register,

    // === BINARY OPERATORS ===
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    Eq,    // ==
    Neq,   // !=
    And,   // &&
    Or,    // ||

    // === GROUPING ===
    LParen, // (
    RParen, // )

    // === UNARY OPERATORS ===
    /// Memory dereference (reclassified `*`)
    Deref,
    /// Arithmetic negation (reclassified `-`)
    Neg,
}

impl TokenKind {
    /// Check if this kind can stand alone as an operand
    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Number | Self::Hex | Self::Register)
    }

    /// Check if this kind is a unary prefix operator
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Deref | Self::Neg)
    }

    /// Check if this kind is a binary operator
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Eq
                | Self::Neq
                | Self::And
                | Self::Or
        )
    }

    /// Check if this kind is any operator
    pub fn is_operator(&self) -> bool {
        self.is_binary() || self.is_unary()
    }

    /// Precedence rank for main-operator selection (lower binds looser)
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Self::Or => Some(0),
            Self::And => Some(1),
            Self::Eq | Self::Neq => Some(2),
            Self::Plus | Self::Minus => Some(3),
            Self::Star | Self::Slash => Some(4),
            Self::Neg | Self::Deref => Some(5),
            _ => None,
        }
    }

    /// Short symbolic name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Hex => "hex",
            Self::Register => "register",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Deref => "deref",
            Self::Neg => "neg",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified token with its matched text and source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Matched source text, already bounded by the token text limit
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Hex | TokenKind::Register => {
                write!(f, "{}({})", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(TokenKind::Or.precedence() < TokenKind::And.precedence());
        assert!(TokenKind::And.precedence() < TokenKind::Eq.precedence());
        assert_eq!(TokenKind::Eq.precedence(), TokenKind::Neq.precedence());
        assert!(TokenKind::Minus.precedence() < TokenKind::Star.precedence());
        assert!(TokenKind::Slash.precedence() < TokenKind::Neg.precedence());
        assert_eq!(TokenKind::Neg.precedence(), TokenKind::Deref.precedence());
    }

    #[test]
    fn test_non_operators_have_no_precedence() {
        for kind in [
            TokenKind::Number,
            TokenKind::Hex,
            TokenKind::Register,
            TokenKind::LParen,
            TokenKind::RParen,
        ] {
            assert_eq!(kind.precedence(), None);
            assert!(!kind.is_operator());
        }
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Register.is_operand());
        assert!(TokenKind::Deref.is_unary());
        assert!(TokenKind::Star.is_binary());
        assert!(!TokenKind::Neg.is_binary());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Hex, "0x10", Span::new(0, 4));
        assert_eq!(token.to_string(), "hex(0x10)");
        assert_eq!(
            Token::new(TokenKind::And, "&&", Span::new(1, 3)).to_string(),
            "&&"
        );
    }
}
