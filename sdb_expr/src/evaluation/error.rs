//! Evaluation error types

use crate::config::constants::compile_time::evaluation::MAX_EVAL_DEPTH;
use crate::logging::codes;
use crate::machine::{MemoryError, Word};
use crate::tokens::TokenKind;
use crate::utils::Span;

/// Failures of the recursive evaluator; all are recoverable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("Missing operand at {span}")]
    EmptyOperand { span: Span },

    #[error("'{kind}' cannot stand alone as an operand at {span}")]
    InvalidOperand { kind: TokenKind, span: Span },

    #[error("Unresolved register '{name}'")]
    UnresolvedRegister { name: String, span: Span },

    #[error("Division by zero at {span}")]
    DivisionByZero { span: Span },

    #[error("Cannot read guest memory at {address:#x}: {source}")]
    UnreadableAddress {
        address: Word,
        span: Span,
        #[source]
        source: MemoryError,
    },

    #[error("Literal '{text}' does not fit in a machine word")]
    LiteralOutOfRange { text: String, span: Span },

    #[error("No operator joins the operands at {start}..{end}")]
    MalformedExpression { start: usize, end: usize },

    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedParentheses { position: usize },

    #[error("Expression nesting too deep: {depth} (max {MAX_EVAL_DEPTH})")]
    ExpressionTooDeep { depth: usize },
}

impl EvalError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            EvalError::EmptyOperand { .. } => codes::evaluation::EMPTY_OPERAND,
            EvalError::InvalidOperand { .. } => codes::evaluation::INVALID_OPERAND,
            EvalError::UnresolvedRegister { .. } => codes::evaluation::UNRESOLVED_REGISTER,
            EvalError::DivisionByZero { .. } => codes::evaluation::DIVISION_BY_ZERO,
            EvalError::UnreadableAddress { .. } => codes::machine::UNREADABLE_ADDRESS,
            EvalError::LiteralOutOfRange { .. } => codes::evaluation::LITERAL_OUT_OF_RANGE,
            EvalError::MalformedExpression { .. } => codes::evaluation::MALFORMED_EXPRESSION,
            EvalError::UnbalancedParentheses { .. } => codes::evaluation::UNBALANCED_PARENTHESES,
            EvalError::ExpressionTooDeep { .. } => codes::evaluation::EXPRESSION_TOO_DEEP,
        }
    }

    /// Source location the error points at
    pub fn span(&self) -> Span {
        match self {
            EvalError::EmptyOperand { span }
            | EvalError::InvalidOperand { span, .. }
            | EvalError::UnresolvedRegister { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::UnreadableAddress { span, .. }
            | EvalError::LiteralOutOfRange { span, .. } => *span,
            EvalError::MalformedExpression { start, end } => Span::new(*start, *end),
            EvalError::UnbalancedParentheses { position } => Span::new(*position, position + 1),
            EvalError::ExpressionTooDeep { .. } => Span::point(0),
        }
    }

    /// Structural errors come from the token layout, not from machine state
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EvalError::EmptyOperand { .. }
                | EvalError::InvalidOperand { .. }
                | EvalError::MalformedExpression { .. }
                | EvalError::UnbalancedParentheses { .. }
                | EvalError::ExpressionTooDeep { .. }
        )
    }
}
