//! Token system for expression lexical analysis
//!
//! This module holds the types produced by the tokenizer and consumed by the
//! disambiguation pass and the evaluator.
//!
//! ## Key Components
//!
//! - **[`TokenKind`]** - Every grammar terminal and operator kind, including
//!   the two context-sensitive unary kinds (`Deref`, `Neg`)
//! - **[`Token`]** - A kind with its matched source text and [`Span`]
//! - **[`TokenStream`]** - Index-addressable, per-call token sequence
//!
//! Whitespace never reaches a stream; the skip rule is consumed by the
//! tokenizer without producing a token.

pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use token::{Token, TokenKind};
pub use token_stream::{TokenStream, TokenStreamBuilder};

// Re-export span types from utils
pub use crate::utils::Span;
