//! Consolidated error codes and classification system
//!
//! Single source of truth for all event codes and their metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const RULE_COMPILATION_FAILURE: Code = Code::new("ERR003");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const INVALID_CONFIGURATION: Code = Code::new("E010");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const NO_MATCHING_RULE: Code = Code::new("E020");
    pub const TOKEN_TOO_LONG: Code = Code::new("E021");
    pub const EXPRESSION_TOO_LONG: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E023");

    pub const TOKEN_TRUNCATED: Code = Code::new("W020");
}

/// Expression evaluation error codes
pub mod evaluation {
    use super::Code;

    pub const EMPTY_OPERAND: Code = Code::new("E060");
    pub const INVALID_OPERAND: Code = Code::new("E061");
    pub const UNRESOLVED_REGISTER: Code = Code::new("E062");
    pub const DIVISION_BY_ZERO: Code = Code::new("E063");
    pub const LITERAL_OUT_OF_RANGE: Code = Code::new("E064");
    pub const MALFORMED_EXPRESSION: Code = Code::new("E065");
    pub const UNBALANCED_PARENTHESES: Code = Code::new("E066");
    pub const EXPRESSION_TOO_DEEP: Code = Code::new("E067");

    pub const REGISTER_DEFAULTED_TO_ZERO: Code = Code::new("W062");
}

/// Guest machine collaborator error codes
pub mod machine {
    use super::Code;

    pub const UNREADABLE_ADDRESS: Code = Code::new("E080");
    pub const UNSUPPORTED_WIDTH: Code = Code::new("E081");
    pub const INVALID_MACHINE_IMAGE: Code = Code::new("E082");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const RULE_TABLE_COMPILED: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const DISAMBIGUATION_COMPLETE: Code = Code::new("I030");
    pub const EXPRESSION_EVALUATED: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const METADATA: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        "Critical internal error",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        "Subsystem initialization failed",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::Critical,
        false,
        "A lexical rule pattern failed to compile",
    ),
    ErrorMetadata::new(
        "E010",
        "Configuration",
        Severity::High,
        true,
        "Runtime configuration is invalid",
    ),
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::Medium,
        true,
        "No lexical rule matches at the scan position",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::Medium,
        true,
        "Matched token text exceeds the configured bound",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::Medium,
        true,
        "Expression text exceeds the maximum length",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::Medium,
        true,
        "Expression produces too many tokens",
    ),
    ErrorMetadata::new(
        "W020",
        "Lexical",
        Severity::Low,
        true,
        "Token text was truncated to the configured bound",
    ),
    ErrorMetadata::new(
        "E060",
        "Evaluation",
        Severity::Medium,
        true,
        "An operator is missing an operand",
    ),
    ErrorMetadata::new(
        "E061",
        "Evaluation",
        Severity::Medium,
        true,
        "Token cannot stand alone as an operand",
    ),
    ErrorMetadata::new(
        "E062",
        "Evaluation",
        Severity::Medium,
        true,
        "Register is not provided by the register file",
    ),
    ErrorMetadata::new(
        "E063",
        "Evaluation",
        Severity::Medium,
        true,
        "Division by zero",
    ),
    ErrorMetadata::new(
        "E064",
        "Evaluation",
        Severity::Medium,
        true,
        "Literal does not fit in a machine word",
    ),
    ErrorMetadata::new(
        "E065",
        "Evaluation",
        Severity::Medium,
        true,
        "Expression has no operator joining its operands",
    ),
    ErrorMetadata::new(
        "E066",
        "Evaluation",
        Severity::Medium,
        true,
        "Parentheses are not balanced",
    ),
    ErrorMetadata::new(
        "E067",
        "Evaluation",
        Severity::High,
        true,
        "Expression nesting exceeds the evaluation depth limit",
    ),
    ErrorMetadata::new(
        "W062",
        "Evaluation",
        Severity::Low,
        true,
        "Unresolved register evaluated as zero",
    ),
    ErrorMetadata::new(
        "E080",
        "Machine",
        Severity::Medium,
        true,
        "Guest memory at the address is not readable",
    ),
    ErrorMetadata::new(
        "E081",
        "Machine",
        Severity::High,
        true,
        "Guest memory read width is not supported",
    ),
    ErrorMetadata::new(
        "E082",
        "Machine",
        Severity::High,
        true,
        "Machine image is invalid",
    ),
    ErrorMetadata::new(
        "I004",
        "System",
        Severity::Low,
        true,
        "Logging system initialized",
    ),
    ErrorMetadata::new(
        "I010",
        "Lexical",
        Severity::Low,
        true,
        "Lexical rule table compiled",
    ),
    ErrorMetadata::new(
        "I020",
        "Lexical",
        Severity::Low,
        true,
        "Tokenization completed",
    ),
    ErrorMetadata::new(
        "I030",
        "Disambiguation",
        Severity::Low,
        true,
        "Operator disambiguation completed",
    ),
    ErrorMetadata::new(
        "I060",
        "Evaluation",
        Severity::Low,
        true,
        "Expression evaluated",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Number of codes with registered metadata
pub fn registered_code_count() -> usize {
    get_error_registry().len()
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let mut seen = HashSet::new();
        for metadata in METADATA {
            assert!(seen.insert(metadata.code), "duplicate {}", metadata.code);
        }
    }

    #[test]
    fn test_every_constant_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::RULE_COMPILATION_FAILURE,
            config::INVALID_CONFIGURATION,
            lexical::NO_MATCHING_RULE,
            lexical::TOKEN_TOO_LONG,
            lexical::EXPRESSION_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            lexical::TOKEN_TRUNCATED,
            evaluation::EMPTY_OPERAND,
            evaluation::INVALID_OPERAND,
            evaluation::UNRESOLVED_REGISTER,
            evaluation::DIVISION_BY_ZERO,
            evaluation::LITERAL_OUT_OF_RANGE,
            evaluation::MALFORMED_EXPRESSION,
            evaluation::UNBALANCED_PARENTHESES,
            evaluation::EXPRESSION_TOO_DEEP,
            evaluation::REGISTER_DEFAULTED_TO_ZERO,
            machine::UNREADABLE_ADDRESS,
            machine::UNSUPPORTED_WIDTH,
            machine::INVALID_MACHINE_IMAGE,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::RULE_TABLE_COMPILED,
            success::TOKENIZATION_COMPLETE,
            success::DISAMBIGUATION_COMPLETE,
            success::EXPRESSION_EVALUATED,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E063"), "Evaluation");
        assert_eq!(get_severity("ERR003"), Severity::Critical);
        assert!(!is_recoverable("ERR003"));
        assert_eq!(get_description("nope"), "Unknown error");
    }
}
