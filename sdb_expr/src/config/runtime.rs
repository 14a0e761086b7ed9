// RUNTIME PREFERENCES (User Experience)

use crate::config::constants::compile_time::lexical::MAX_TOKEN_TEXT_LENGTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid preference '{name}': {reason}")]
    InvalidPreference { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::config::INVALID_CONFIGURATION
    }
}

/// What the tokenizer does with a match longer than the token text bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlongTokenPolicy {
    /// Fail with `LexerError::TokenTooLong`
    Reject,
    /// Keep the leading characters only (lossy)
    Truncate,
}

impl OverlongTokenPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "truncate" => Some(Self::Truncate),
            _ => None,
        }
    }
}

/// What a register reference evaluates to when the register file lacks it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedRegisterPolicy {
    /// Fail with `EvalError::UnresolvedRegister`
    Error,
    /// Evaluate to 0 and log a warning
    Zero,
}

impl UnresolvedRegisterPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "zero" => Some(Self::Zero),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Characters kept per token (at most MAX_TOKEN_TEXT_LENGTH)
    pub max_token_text_length: usize,

    /// Handling of matches longer than `max_token_text_length`
    pub overlong_token_policy: OverlongTokenPolicy,

    /// Whether to log every rule match at debug level
    pub log_rule_matches: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            max_token_text_length: env::var(env_vars::LEXICAL_MAX_TOKEN_TEXT_LENGTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_TOKEN_TEXT_LENGTH),
            overlong_token_policy: env::var(env_vars::LEXICAL_OVERLONG_TOKEN_POLICY)
                .ok()
                .and_then(|v| OverlongTokenPolicy::parse(&v))
                .unwrap_or(OverlongTokenPolicy::Reject),
            log_rule_matches: env::var(env_vars::LEXICAL_LOG_RULE_MATCHES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationPreferences {
    /// Result of a register reference the register file cannot resolve
    pub unresolved_register_policy: UnresolvedRegisterPolicy,

    /// Whether to log each sub-range split at debug level
    pub log_evaluation_steps: bool,
}

impl Default for EvaluationPreferences {
    fn default() -> Self {
        Self {
            unresolved_register_policy: env::var(env_vars::EVAL_UNRESOLVED_REGISTER_POLICY)
                .ok()
                .and_then(|v| UnresolvedRegisterPolicy::parse(&v))
                .unwrap_or(UnresolvedRegisterPolicy::Error),
            log_evaluation_steps: env::var(env_vars::EVAL_LOG_STEPS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether to print events directly instead of forwarding to the `log` facade
    pub enable_console_logging: bool,

    /// Minimum event level that gets logged
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub(crate) fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub evaluation: EvaluationPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check preferences against compile-time limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        let length = self.lexical.max_token_text_length;
        if length == 0 || length > MAX_TOKEN_TEXT_LENGTH {
            return Err(ConfigError::InvalidPreference {
                name: "lexical.max_token_text_length",
                reason: format!("{} is outside 1..={}", length, MAX_TOKEN_TEXT_LENGTH),
            });
        }
        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_MAX_TOKEN_TEXT_LENGTH: &str = "SDB_LEXICAL_MAX_TOKEN_TEXT_LENGTH";
    pub const LEXICAL_OVERLONG_TOKEN_POLICY: &str = "SDB_LEXICAL_OVERLONG_TOKEN_POLICY";
    pub const LEXICAL_LOG_RULE_MATCHES: &str = "SDB_LEXICAL_LOG_RULE_MATCHES";

    // Evaluation
    pub const EVAL_UNRESOLVED_REGISTER_POLICY: &str = "SDB_EVAL_UNRESOLVED_REGISTER_POLICY";
    pub const EVAL_LOG_STEPS: &str = "SDB_EVAL_LOG_STEPS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SDB_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SDB_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SDB_LOGGING_MIN_LEVEL";
}
