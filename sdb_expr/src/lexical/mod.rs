//! Lexical analysis module
//!
//! Order-precedence tokenization of expression text over a rule table that
//! is compiled once and shared read-only afterwards.

pub mod analyzer;
pub mod rules;

use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use rules::{
    init_rule_table, rule_table, LexRule, RuleAction, RuleCompileError, RuleMatch, RuleTable,
};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize with a one-off analyzer over `table`
pub fn tokenize_with_preferences(
    input: &str,
    preferences: LexicalPreferences,
    table: &RuleTable,
) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::with_table(table, preferences).tokenize(input)
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Compile the rule table and check the lexical error codes (for startup)
pub fn init_lexical_analysis() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::NO_MATCHING_RULE,
        crate::logging::codes::lexical::TOKEN_TOO_LONG,
        crate::logging::codes::lexical::EXPRESSION_TOO_LONG,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
        crate::logging::codes::lexical::TOKEN_TRUNCATED,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    let table = init_rule_table().map_err(|e| e.to_string())?;

    crate::log_debug!("Lexical limits initialized",
        "rules" => table.len(),
        "max_token_text_length" => MAX_TOKEN_TEXT_LENGTH,
        "max_expression_length" => MAX_EXPRESSION_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

/// Get the current compile-time lexical limits (for reporting/debugging)
pub fn get_security_limits() -> SecurityLimits {
    SecurityLimits {
        max_token_text_length: MAX_TOKEN_TEXT_LENGTH,
        max_expression_length: MAX_EXPRESSION_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
    }
}

/// Information about compile-time lexical limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityLimits {
    pub max_token_text_length: usize,
    pub max_expression_length: usize,
    pub max_token_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::OverlongTokenPolicy;

    #[test]
    fn test_init_lexical_analysis() {
        assert!(init_lexical_analysis().is_ok());
    }

    #[test]
    fn test_security_limits() {
        let limits = get_security_limits();
        assert_eq!(limits.max_token_text_length, 31);
        assert!(limits.max_token_count <= limits.max_expression_length);
    }

    #[test]
    fn test_tokenize_with_custom_table() {
        let table = RuleTable::from_specs(&[
            ("[0-9]", RuleAction::Emit(crate::tokens::TokenKind::Number)),
            (r"\+", RuleAction::Emit(crate::tokens::TokenKind::Plus)),
        ])
        .unwrap();
        let preferences = LexicalPreferences {
            max_token_text_length: MAX_TOKEN_TEXT_LENGTH,
            overlong_token_policy: OverlongTokenPolicy::Reject,
            log_rule_matches: false,
        };

        // Single-digit rule splits "12" into two literals
        let stream = tokenize_with_preferences("12+3", preferences, &table).unwrap();
        assert_eq!(stream.len(), 4);
    }
}
