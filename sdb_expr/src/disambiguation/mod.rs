//! Context-sensitive operator reclassification
//!
//! One left-to-right pass over a freshly tokenized stream. Each decision
//! looks only at the kind of the immediately preceding token, as already
//! rewritten by this pass:
//!
//! - `*` becomes [`TokenKind::Deref`] when it is first or follows anything
//!   other than a literal, a register or `)`.
//! - `-` becomes [`TokenKind::Neg`] when it is first or follows `(`, a
//!   dereference, or one of the binary `+ - * /`.
//!
//! The pass is total; it never fails.

use crate::logging::codes;
use crate::tokens::{TokenKind, TokenStream};

/// Counts of rewritten tokens
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisambiguationSummary {
    pub dereferences: usize,
    pub negations: usize,
}

/// Whether a `*` after `previous` is a dereference
fn star_is_deref(previous: Option<TokenKind>) -> bool {
    !matches!(
        previous,
        Some(TokenKind::Number | TokenKind::Hex | TokenKind::Register | TokenKind::RParen)
    )
}

/// Whether a `-` after `previous` is a negation
fn minus_is_neg(previous: Option<TokenKind>) -> bool {
    match previous {
        None => true,
        Some(kind) => matches!(
            kind,
            TokenKind::LParen
                | TokenKind::Deref
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
        ),
    }
}

/// Rewrite `*` and `-` tokens in place
pub fn disambiguate(stream: &mut TokenStream) -> DisambiguationSummary {
    let mut summary = DisambiguationSummary::default();
    let mut previous: Option<TokenKind> = None;

    for token in stream.iter_mut() {
        match token.kind {
            TokenKind::Star if star_is_deref(previous) => {
                token.kind = TokenKind::Deref;
                summary.dereferences += 1;
            }
            TokenKind::Minus if minus_is_neg(previous) => {
                token.kind = TokenKind::Neg;
                summary.negations += 1;
            }
            _ => {}
        }
        previous = Some(token.kind);
    }

    log_success!(codes::success::DISAMBIGUATION_COMPLETE, "Operator disambiguation completed",
        "dereferences" => summary.dereferences,
        "negations" => summary.negations
    );

    summary
}
