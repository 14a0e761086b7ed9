//! Ordered lexical rule table
//!
//! Rule order is the matching priority: at a scan position the first rule
//! whose pattern matches exactly at that position wins, whatever the match
//! length of later rules. Patterns are compiled anchored and applied to the
//! remaining input slice.

use crate::logging::codes;
use crate::tokens::TokenKind;
use regex::Regex;
use std::sync::OnceLock;

/// What a matched rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Consume the text without emitting a token
    Skip,
    /// Emit a token of this kind
    Emit(TokenKind),
}

/// Source patterns in priority order
pub const RULE_SPECS: &[(&str, RuleAction)] = &[
    (" +", RuleAction::Skip),
    (r"\+", RuleAction::Emit(TokenKind::Plus)),
    ("-", RuleAction::Emit(TokenKind::Minus)),
    ("==", RuleAction::Emit(TokenKind::Eq)),
    ("!=", RuleAction::Emit(TokenKind::Neq)),
    ("&&", RuleAction::Emit(TokenKind::And)),
    (r"\|\|", RuleAction::Emit(TokenKind::Or)),
    (r"\*", RuleAction::Emit(TokenKind::Star)),
    ("/", RuleAction::Emit(TokenKind::Slash)),
    (r"\b[0-9]+\b", RuleAction::Emit(TokenKind::Number)),
    (r"\(", RuleAction::Emit(TokenKind::LParen)),
    (r"\)", RuleAction::Emit(TokenKind::RParen)),
    (
        r"\$(?:0|ra|sp|gp|tp|t[0-6]|s(?:1[01]|[0-9])|a[0-7])\b",
        RuleAction::Emit(TokenKind::Register),
    ),
    (r"\b0[xX][0-9a-fA-F]+\b", RuleAction::Emit(TokenKind::Hex)),
];

/// A rule pattern that failed to compile
#[derive(Debug, Clone, thiserror::Error)]
#[error("Lexical rule {index} ('{pattern}') failed to compile: {source}")]
pub struct RuleCompileError {
    pub index: usize,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

impl RuleCompileError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::system::RULE_COMPILATION_FAILURE
    }
}

/// A compiled lexical rule
#[derive(Debug, Clone)]
pub struct LexRule {
    pattern: &'static str,
    action: RuleAction,
    regex: Regex,
}

impl LexRule {
    /// Compile `pattern` anchored at the start of the haystack
    pub fn compile(
        index: usize,
        pattern: &'static str,
        action: RuleAction,
    ) -> Result<Self, RuleCompileError> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            RuleCompileError {
                index,
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            pattern,
            action,
            regex,
        })
    }

    /// The pattern as written in the table, without the anchor
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    pub fn action(&self) -> RuleAction {
        self.action
    }

    /// Length of a non-empty match at the start of `input`
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// The first rule that matched at a position
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'t> {
    pub index: usize,
    pub rule: &'t LexRule,
    pub len: usize,
}

/// Immutable, ordered set of compiled rules
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<LexRule>,
}

impl RuleTable {
    /// Compile the built-in rule set
    pub fn compile() -> Result<Self, RuleCompileError> {
        Self::from_specs(RULE_SPECS)
    }

    /// Compile an arbitrary ordered rule set
    pub fn from_specs(specs: &[(&'static str, RuleAction)]) -> Result<Self, RuleCompileError> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(index, &(pattern, action))| LexRule::compile(index, pattern, action))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// First rule, in table order, that matches at the start of `input`
    pub fn match_at<'t>(&'t self, input: &str) -> Option<RuleMatch<'t>> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.match_len(input)
                .map(|len| RuleMatch { index, rule, len })
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexRule> {
        self.rules.iter()
    }
}

// ============================================================================
// PROCESS-WIDE TABLE
// ============================================================================

static RULE_TABLE: OnceLock<RuleTable> = OnceLock::new();

/// Compile the built-in table once; later calls return the shared table
pub fn init_rule_table() -> Result<&'static RuleTable, RuleCompileError> {
    if let Some(table) = RULE_TABLE.get() {
        return Ok(table);
    }

    let table = RuleTable::compile().map_err(|error| {
        log_error!(error.error_code(), "Lexical rule failed to compile",
            "index" => error.index,
            "pattern" => error.pattern.as_str()
        );
        error
    })?;

    let table = RULE_TABLE.get_or_init(|| table);
    log_success!(codes::success::RULE_TABLE_COMPILED, "Lexical rule table compiled",
        "rules" => table.len()
    );
    Ok(table)
}

/// Shared built-in table, compiling it on first use
pub fn rule_table() -> Result<&'static RuleTable, RuleCompileError> {
    init_rule_table()
}
