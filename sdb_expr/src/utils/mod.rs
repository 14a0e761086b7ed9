//! Shared primitive types used across the lexer and evaluator.

pub mod span;

pub use span::Span;
