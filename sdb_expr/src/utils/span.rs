//! Source location tracking for expression text
//!
//! Expressions are a single line, so a location is just a byte offset.
//! Spans are kept on every token so that lexical and evaluation errors can
//! point back at the text that caused them.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open byte range `start..end` of the expression text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Create a zero-width span at an offset
    pub fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if this span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains an offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Get the source text for this span, if it lies inside the input
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start..self.end)
    }

    /// Render the input with a caret line under this span
    pub fn format_pointer(&self, input: &str, message: &str) -> String {
        let prefix = input.get(..self.start).unwrap_or(input);
        let padding = " ".repeat(prefix.chars().count());
        let width = self
            .slice(input)
            .map(|text| text.chars().count())
            .unwrap_or(0)
            .max(1);

        format!(
            "Error: {}\n  | {}\n  | {}{}\n",
            message,
            input,
            padding,
            "^".repeat(width)
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
