use crate::evaluation::EvalError;
use crate::lexical::{LexerError, RuleCompileError};
use crate::utils::Span;

/// Expression processing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExprError {
    #[error("Rule table initialization failed: {0}")]
    Initialization(#[from] RuleCompileError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
}

impl ExprError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ExprError::Initialization(error) => error.error_code(),
            ExprError::LexicalAnalysis(error) => error.error_code(),
            ExprError::Evaluation(error) => error.error_code(),
        }
    }

    /// Whether the expression text itself is at fault, independent of machine state
    pub fn is_structural(&self) -> bool {
        match self {
            ExprError::Initialization(_) => false,
            ExprError::LexicalAnalysis(_) => true,
            ExprError::Evaluation(error) => error.is_structural(),
        }
    }

    /// Source location of the failure, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            ExprError::Initialization(_) => None,
            ExprError::LexicalAnalysis(error) => Some(error.span()),
            ExprError::Evaluation(error) => Some(error.span()),
        }
    }
}
