//! Configuration module for the SDB expression evaluator
//!
//! Hard limits live in [`constants::compile_time`] and cannot be changed at
//! runtime. User preferences live in [`runtime`] and are read from `SDB_*`
//! environment variables or a TOML file.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    ConfigError, EvaluationPreferences, LexicalPreferences, LoggingPreferences,
    OverlongTokenPolicy, RuntimeConfig, UnresolvedRegisterPolicy,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SDB_BUILD_PROFILE").unwrap_or("development")
    }

    /// Machine word width the crate was built for, in bits
    pub fn word_bits() -> u32 {
        crate::machine::WORD_BITS
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("profile {} ({}-bit guest)", profile(), word_bits())
    }
}
