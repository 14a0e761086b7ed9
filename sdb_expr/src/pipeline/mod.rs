mod error;
mod result;
mod validation;

// Re-export public types
pub use error::ExprError;
pub use result::ExprResult;
pub use validation::validate_pipeline;

use crate::config::runtime::{EvaluationPreferences, LexicalPreferences, RuntimeConfig};
use crate::disambiguation::disambiguate;
use crate::evaluation::Evaluator;
use crate::lexical::{rule_table, LexicalAnalyzer, RuleTable};
use crate::machine::{EvalContext, Word};
use crate::tokens::TokenStream;
use std::time::Instant;

/// Tokenizer, disambiguator and evaluator bound to one configuration
#[derive(Debug, Clone)]
pub struct ExprEngine {
    table: &'static RuleTable,
    lexical: LexicalPreferences,
    evaluator: Evaluator,
}

impl ExprEngine {
    /// Engine with preferences taken from the environment
    pub fn new() -> Result<Self, ExprError> {
        Self::with_preferences(LexicalPreferences::default(), EvaluationPreferences::default())
    }

    pub fn with_config(config: &RuntimeConfig) -> Result<Self, ExprError> {
        Self::with_preferences(config.lexical.clone(), config.evaluation.clone())
    }

    pub fn with_preferences(
        lexical: LexicalPreferences,
        evaluation: EvaluationPreferences,
    ) -> Result<Self, ExprError> {
        Ok(Self {
            table: rule_table()?,
            lexical,
            evaluator: Evaluator::with_preferences(evaluation),
        })
    }

    fn analyzer(&self) -> LexicalAnalyzer<'static> {
        LexicalAnalyzer::with_table(self.table, self.lexical.clone())
    }

    /// Tokenize and disambiguate without evaluating
    pub fn tokenize(&self, text: &str) -> Result<TokenStream, ExprError> {
        let mut tokens = self.analyzer().tokenize(text)?;
        disambiguate(&mut tokens);
        Ok(tokens)
    }

    /// Evaluate one expression
    pub fn evaluate(&self, text: &str, context: &EvalContext<'_>) -> Result<Word, ExprError> {
        self.evaluate_detailed(text, context).map(|result| result.value)
    }

    /// Evaluate one expression and keep the per-stage details
    pub fn evaluate_detailed(
        &self,
        text: &str,
        context: &EvalContext<'_>,
    ) -> Result<ExprResult, ExprError> {
        let start_time = Instant::now();

        crate::log_debug!("Evaluating expression", "expression" => text);

        // Stage 1: Lexical analysis
        let mut analyzer = self.analyzer();
        let mut tokens = analyzer.tokenize(text)?;

        // Stage 2: Operator disambiguation
        let disambiguation = disambiguate(&mut tokens);

        // Stage 3: Evaluation
        let value = self.evaluator.evaluate(&tokens, context).map_err(|error| {
            crate::log_error!(error.error_code(), "Expression evaluation failed",
                span = error.span(),
                "expression" => text,
                "error" => &error
            );
            error
        })?;

        let result = ExprResult::new(
            value,
            tokens,
            analyzer.metrics().clone(),
            disambiguation,
            start_time.elapsed(),
        );
        result.log_success(text);

        Ok(result)
    }
}

/// Evaluate `text` against `context` with environment preferences
pub fn expr(text: &str, context: &EvalContext<'_>) -> Result<Word, ExprError> {
    ExprEngine::new()?.evaluate(text, context)
}

/// Value plus success flag; the value is 0 whenever the flag is false
pub fn expr_with_flag(text: &str, context: &EvalContext<'_>) -> (Word, bool) {
    match expr(text, context) {
        Ok(value) => (value, true),
        Err(_) => (0, false),
    }
}
