pub mod compile_time {
    pub mod lexical {
        /// Maximum characters stored for a single token's source text
        /// RESOURCE: Bounds per-token storage; runtime preferences may lower it
        pub const MAX_TOKEN_TEXT_LENGTH: usize = 31;

        /// Maximum expression length accepted by the tokenizer (bytes)
        /// SECURITY: Prevents DoS via enormous console input
        pub const MAX_EXPRESSION_LENGTH: usize = 4096;

        /// Maximum number of tokens produced for one expression
        /// SECURITY: Bounds allocation for a single evaluation
        pub const MAX_TOKEN_COUNT: usize = 1024;
    }

    pub mod evaluation {
        /// Maximum recursion depth of the range evaluator
        /// SECURITY: Prevents stack overflow on deeply nested parentheses
        pub const MAX_EVAL_DEPTH: usize = 256;
    }

    pub mod logging {
        /// Maximum length of a single log message
        /// RESOURCE: Long expressions are cut in log context values
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 1024;

        /// Lowest level (0 = error .. 3 = debug) that may never be filtered out
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn test_limits_are_consistent() {
        assert!(lexical::MAX_TOKEN_TEXT_LENGTH > 0);
        assert!(lexical::MAX_TOKEN_COUNT <= lexical::MAX_EXPRESSION_LENGTH);
        assert!(evaluation::MAX_EVAL_DEPTH > 0);
        assert!(logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }
}
