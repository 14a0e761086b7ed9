//! Batch checking of `<expected> <expression>` lines
//!
//! Blank lines and lines starting with `#` are skipped. The expected value
//! is a decimal or `0x`-prefixed word.

use sdb_expr::{EvalContext, ExprEngine, Word};
use std::fmt;

/// Why one line did not check out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The line has no expression after the expected value
    MissingExpression,
    /// The expected value is not a word
    BadExpectedValue(String),
    /// Evaluation failed
    Error { code: String, message: String },
    /// Evaluation succeeded with another value
    Mismatch { actual: Word },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    pub line_number: usize,
    pub expression: String,
    pub expected: Option<Word>,
    pub kind: FailureKind,
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line_number)?;
        match &self.kind {
            FailureKind::MissingExpression => write!(f, "missing expression"),
            FailureKind::BadExpectedValue(text) => write!(f, "bad expected value '{}'", text),
            FailureKind::Error { code, message } => {
                write!(f, "'{}' failed: [{}] {}", self.expression, code, message)
            }
            FailureKind::Mismatch { actual } => write!(
                f,
                "'{}' = {} (expected {})",
                self.expression,
                actual,
                self.expected.unwrap_or_default()
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<CaseFailure>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.passed as f64 / self.total as f64
    }
}

fn parse_word(text: &str) -> Option<Word> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => Word::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Evaluate every case in `text` and compare against its expected value
pub fn check_lines(text: &str, engine: &ExprEngine, context: &EvalContext<'_>) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        report.total += 1;

        let (expected_text, expression) = match line.split_once(' ') {
            Some((expected, expression)) => (expected, expression.trim()),
            None => (line, ""),
        };

        let mut failure = CaseFailure {
            line_number: index + 1,
            expression: expression.to_string(),
            expected: None,
            kind: FailureKind::MissingExpression,
        };

        let Some(expected) = parse_word(expected_text) else {
            failure.kind = FailureKind::BadExpectedValue(expected_text.to_string());
            report.failures.push(failure);
            continue;
        };
        failure.expected = Some(expected);

        if expression.is_empty() {
            report.failures.push(failure);
            continue;
        }

        match engine.evaluate(expression, context) {
            Ok(actual) if actual == expected => report.passed += 1,
            Ok(actual) => {
                failure.kind = FailureKind::Mismatch { actual };
                report.failures.push(failure);
            }
            Err(error) => {
                failure.kind = FailureKind::Error {
                    code: error.error_code().to_string(),
                    message: error.to_string(),
                };
                report.failures.push(failure);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MachineImage;
    use assert_matches::assert_matches;

    #[test]
    fn test_batch_counts() {
        let machine = MachineImage::default().build().unwrap();
        let engine = ExprEngine::new().unwrap();
        let report = check_lines(
            "# generated cases\n7 1+2*3\n\n9 (1+2)*3\n0x10 0x10\n5 2+2\n",
            &engine,
            &machine.context(),
        );

        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].line_number, 6);
        assert_matches!(report.failures[0].kind, FailureKind::Mismatch { actual: 4 });
        assert!(!report.all_passed());
    }

    #[test]
    fn test_batch_malformed_lines() {
        let machine = MachineImage::default().build().unwrap();
        let engine = ExprEngine::new().unwrap();
        let report = check_lines("abc 1+1\n3\n0 5/0\n", &engine, &machine.context());

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 0);
        assert_matches!(report.failures[0].kind, FailureKind::BadExpectedValue(_));
        assert_matches!(report.failures[1].kind, FailureKind::MissingExpression);
        assert_matches!(
            &report.failures[2].kind,
            FailureKind::Error { code, .. } if code == "E063"
        );
    }

    #[test]
    fn test_empty_batch_passes() {
        let machine = MachineImage::default().build().unwrap();
        let engine = ExprEngine::new().unwrap();
        let report = check_lines("\n# nothing\n", &engine, &machine.context());
        assert!(report.all_passed());
        assert_eq!(report.success_rate(), 1.0);
    }
}
