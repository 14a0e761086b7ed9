//! Expression evaluation
//!
//! Computes a machine word from a disambiguated [`TokenStream`] using a
//! fixed precedence table:
//!
//! | rank | operators |
//! |------|-----------|
//! | 0 | `\|\|` |
//! | 1 | `&&` |
//! | 2 | `==` `!=` |
//! | 3 | binary `+` `-` |
//! | 4 | `*` `/` |
//! | 5 | unary `-` and `*` |
//!
//! Arithmetic wraps at the word width and `/` is unsigned. Comparisons and
//! logical operators yield 1 or 0. Both operands of `&&` and `||` are always
//! evaluated.
//!
//! [`TokenStream`]: crate::tokens::TokenStream

pub mod error;
pub mod evaluator;

pub use error::EvalError;
pub use evaluator::{check_balance, is_wrapped, main_operator, Evaluator};
