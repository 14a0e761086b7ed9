//! Core lexical analyzer
//!
//! Scans the input left to right with the ordered rule table. At every
//! cursor position the first anchored match wins; skip rules advance the
//! cursor without producing a token.

use super::rules::{rule_table, RuleAction, RuleCompileError, RuleTable};
use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::{LexicalPreferences, OverlongTokenPolicy};
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::Span;

/// Lexical analysis errors with compile-time security boundaries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("No lexical rule matches at position {position}: '{remaining}'")]
    NoMatchingRule { position: usize, remaining: String },

    #[error("Token too long at position {position}: {length} characters (max {max})")]
    TokenTooLong {
        position: usize,
        length: usize,
        max: usize,
    },

    #[error("Expression too long: {length} bytes (max {MAX_EXPRESSION_LENGTH})")]
    ExpressionTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::NoMatchingRule { .. } => codes::lexical::NO_MATCHING_RULE,
            LexerError::TokenTooLong { .. } => codes::lexical::TOKEN_TOO_LONG,
            LexerError::ExpressionTooLong { .. } => codes::lexical::EXPRESSION_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Source location the error points at
    pub fn span(&self) -> Span {
        match self {
            LexerError::NoMatchingRule { position, .. } => Span::new(*position, position + 1),
            LexerError::TokenTooLong {
                position, length, ..
            } => Span::new(*position, position + length),
            LexerError::ExpressionTooLong { .. } | LexerError::TooManyTokens { .. } => {
                Span::point(0)
            }
        }
    }
}

/// Essential lexical analysis metrics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub operand_tokens: usize,
    pub operator_tokens: usize,
    pub skipped_bytes: usize,
    pub truncated_tokens: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, kind: TokenKind) {
        self.total_tokens += 1;
        if kind.is_operand() {
            self.operand_tokens += 1;
        } else if kind.is_operator() {
            self.operator_tokens += 1;
        }
    }
}

/// Core lexical analyzer over a compiled rule table
pub struct LexicalAnalyzer<'t> {
    table: &'t RuleTable,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
}

impl LexicalAnalyzer<'static> {
    /// Analyzer over the shared built-in rule table
    pub fn new() -> Result<Self, RuleCompileError> {
        Ok(Self::with_table(rule_table()?, LexicalPreferences::default()))
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Result<Self, RuleCompileError> {
        Ok(Self::with_table(rule_table()?, preferences))
    }
}

impl<'t> LexicalAnalyzer<'t> {
    pub fn with_table(table: &'t RuleTable, preferences: LexicalPreferences) -> Self {
        Self {
            table,
            preferences,
            metrics: LexicalMetrics::default(),
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Metrics of the most recent `tokenize` call
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Character bound applied to matched token text
    fn text_limit(&self) -> usize {
        self.preferences
            .max_token_text_length
            .clamp(1, MAX_TOKEN_TEXT_LENGTH)
    }

    /// Tokenize one expression into a fresh token stream
    pub fn tokenize(&mut self, input: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        // SECURITY: bound the input before scanning
        if input.len() > MAX_EXPRESSION_LENGTH {
            let error = LexerError::ExpressionTooLong {
                length: input.len(),
            };
            log_error!(error.error_code(), "Expression exceeds maximum length",
                "length" => input.len(),
                "limit" => MAX_EXPRESSION_LENGTH
            );
            return Err(error);
        }

        log_debug!("Starting lexical analysis",
            "length" => input.len(),
            "rules" => self.table.len()
        );

        let table = self.table;
        let mut stream = TokenStream::with_capacity(input.len().min(MAX_TOKEN_COUNT));
        let mut cursor = 0;

        while cursor < input.len() {
            let remaining = &input[cursor..];

            let Some(found) = table.match_at(remaining) else {
                let error = LexerError::NoMatchingRule {
                    position: cursor,
                    remaining: remaining.to_string(),
                };
                log_error!(error.error_code(), "No lexical rule matched",
                    span = error.span(),
                    "position" => cursor,
                    "remaining" => remaining
                );
                return Err(error);
            };

            let matched = &remaining[..found.len];
            let span = Span::new(cursor, cursor + found.len);

            if self.preferences.log_rule_matches {
                log_debug!("Rule matched",
                    "rule" => found.index,
                    "pattern" => found.rule.pattern(),
                    "position" => cursor,
                    "length" => found.len,
                    "text" => matched
                );
            }

            cursor = span.end;

            let kind = match found.rule.action() {
                RuleAction::Skip => {
                    self.metrics.skipped_bytes += found.len;
                    continue;
                }
                RuleAction::Emit(kind) => kind,
            };

            // SECURITY: check token count limit to prevent DoS
            if stream.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: stream.len() + 1,
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = span,
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let text = self.bound_text(matched, span)?;
            self.metrics.record_token(kind);
            stream.push(Token::new(kind, text, span));
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => stream.len(),
            "operators" => self.metrics.operator_tokens,
            "operands" => self.metrics.operand_tokens
        );

        Ok(stream)
    }

    /// Apply the token text bound according to the overlong-token policy
    fn bound_text<'a>(&mut self, matched: &'a str, span: Span) -> Result<&'a str, LexerError> {
        let max = self.text_limit();
        let length = matched.chars().count();
        if length <= max {
            return Ok(matched);
        }

        match self.preferences.overlong_token_policy {
            OverlongTokenPolicy::Reject => {
                let error = LexerError::TokenTooLong {
                    position: span.start,
                    length,
                    max,
                };
                log_error!(error.error_code(), "Token text exceeds bound",
                    span = span,
                    "length" => length,
                    "max" => max
                );
                Err(error)
            }
            OverlongTokenPolicy::Truncate => {
                let end = matched
                    .char_indices()
                    .nth(max)
                    .map(|(offset, _)| offset)
                    .unwrap_or(matched.len());
                log_warning!(codes::lexical::TOKEN_TRUNCATED, "Token text truncated",
                    "position" => span.start,
                    "length" => length,
                    "kept" => max
                );
                self.metrics.truncated_tokens += 1;
                Ok(&matched[..end])
            }
        }
    }
}
