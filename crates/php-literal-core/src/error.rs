//! Error types for PHP literal parsing.
//!
//! Every failure carries the byte position in the original input, so callers
//! can point the user at the offending character.

use std::fmt;
use thiserror::Error;

/// The error returned when PHP literal text cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Byte offset into the original input where the error was detected.
    pub position: usize,
    /// Optional context about what was being parsed.
    pub context: Option<String>,
    /// Preview of input around error position for debugging.
    pub input_preview: Option<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)?;
        if let Some(ref ctx) = self.context {
            write!(f, " ({})", ctx)?;
        }
        if let Some(ref preview) = self.input_preview {
            write!(f, "\n{}", preview)?;
        }
        Ok(())
    }
}

/// Specific kinds of parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing left to parse after stripping the wrapper.
    #[error("empty input")]
    EmptyInput,

    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Expected a specific character but found something else.
    #[error("expected '{expected}', found '{found}'")]
    UnexpectedChar {
        /// The character that was expected.
        expected: char,
        /// The character that was found.
        found: char,
    },

    /// A value was required but the input had a delimiter instead.
    #[error("expected a value, found '{0}'")]
    ExpectedValue(char),

    /// A quoted string has no closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// An `array(` or `[` has no matching closer.
    #[error("unclosed array, expected '{0}'")]
    UnclosedArray(char),

    /// Input continues after the top-level value.
    #[error("unexpected trailing characters")]
    TrailingCharacters,

    /// An array was used as an array key.
    #[error("illegal offset type: {0} cannot be used as an array key")]
    InvalidArrayKey(&'static str),

    /// An unkeyed element was appended after key `i64::MAX`.
    #[error("cannot add element to the array, the next element is already occupied")]
    ArrayIndexOverflow,

    /// Nesting depth exceeded.
    #[error("maximum nesting depth ({0}) exceeded")]
    MaxDepthExceeded(usize),
}

impl ParseError {
    /// Create a new error with the given kind and position.
    #[inline]
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            context: None,
            input_preview: None,
        }
    }

    /// Add context to the error.
    #[inline]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add input preview around the error position for debugging.
    ///
    /// Shows up to 20 bytes before and after the error position.
    #[cold]
    pub fn with_input_preview(mut self, data: &[u8], error_pos: usize) -> Self {
        let start = error_pos.saturating_sub(20);
        let end = (error_pos + 20).min(data.len());

        if start < end {
            let preview = String::from_utf8_lossy(&data[start..end]);
            // Newlines would break the caret alignment
            let preview = preview.replace(&['\n', '\r', '\t'][..], " ");

            let relative_pos = error_pos.saturating_sub(start);
            let mut result = String::with_capacity(preview.len() + relative_pos + 2);
            result.push_str(&preview);
            result.push('\n');
            result.push_str(&" ".repeat(relative_pos));
            result.push('^');

            self.input_preview = Some(result);
        }
        self
    }
}

/// Result type alias for PHP literal parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
