use crate::disambiguation::DisambiguationSummary;
use crate::lexical::LexicalMetrics;
use crate::machine::Word;
use crate::tokens::TokenStream;
use std::time::Duration;

/// Complete result of one evaluation, with per-stage details
#[derive(Debug, Clone)]
pub struct ExprResult {
    pub value: Word,
    pub tokens: TokenStream,
    pub lexical_metrics: LexicalMetrics,
    pub disambiguation: DisambiguationSummary,
    pub processing_duration: Duration,
}

impl ExprResult {
    pub fn new(
        value: Word,
        tokens: TokenStream,
        lexical_metrics: LexicalMetrics,
        disambiguation: DisambiguationSummary,
        processing_duration: Duration,
    ) -> Self {
        Self {
            value,
            tokens,
            lexical_metrics,
            disambiguation,
            processing_duration,
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn log_success(&self, expression: &str) {
        crate::log_success!(
            crate::logging::codes::success::EXPRESSION_EVALUATED,
            "Expression evaluated",
            "expression" => expression,
            "value" => self.value,
            "tokens" => self.token_count(),
            "duration_us" => format!("{:.1}", self.processing_duration.as_secs_f64() * 1_000_000.0)
        );
    }
}
