//! JSON error types using thiserror 2.0.
//!
//! Every failure of the document model surfaces as a [`JsonError`]: malformed
//! input carries its position, wrong-variant access carries both variant
//! names, and numeric conversions carry the offending text.

use thiserror::Error;

/// Errors raised by the parser, the value accessors and number conversions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// Malformed JSON input.
    #[error("parse error at line {line}, column {column} (offset {offset}): {message}")]
    Parse {
        /// 1-based line of the offending character
        line: usize,
        /// 1-based column (in characters) of the offending character
        column: usize,
        /// 0-based byte offset from the start of the input
        offset: usize,
        /// What the parser expected or found
        message: String,
    },

    /// A value was accessed as the wrong variant.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Variant the caller asked for
        expected: &'static str,
        /// Variant actually held
        actual: &'static str,
    },

    /// Number text not convertible to the requested numeric type.
    #[error("number {text} is not a valid {target}")]
    Format {
        /// Original number text
        text: String,
        /// Requested target type
        target: &'static str,
    },

    /// Array position past the end.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds {
        /// Requested position
        index: usize,
        /// Array length at the time of the call
        len: usize,
    },
}

/// Result type for JSON operations.
pub type JsonResult<T> = Result<T, JsonError>;

impl JsonError {
    /// Create a parse error for `offset` within `input`.
    ///
    /// Line and column are derived from the bytes preceding `offset`; columns
    /// count characters, not bytes.
    #[must_use]
    pub fn parse_at(input: &[u8], offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        // UTF-8 continuation bytes do not start a new character
        let column = before[line_start..]
            .iter()
            .filter(|&&b| b & 0xC0 != 0x80)
            .count()
            + 1;

        Self::Parse {
            line,
            column,
            offset,
            message: message.into(),
        }
    }

    /// Create a type mismatch error.
    #[must_use]
    pub const fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create a number format error.
    #[must_use]
    pub fn format(text: impl Into<String>, target: &'static str) -> Self {
        Self::Format {
            text: text.into(),
            target,
        }
    }

    /// Byte offset for parse errors.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_first_line() {
        let err = JsonError::parse_at(b"{\"a\": }", 6, "expected value");
        assert_eq!(
            err,
            JsonError::Parse {
                line: 1,
                column: 7,
                offset: 6,
                message: "expected value".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_position_after_newlines() {
        let input = b"{\n  \"a\":\n  x}";
        let err = JsonError::parse_at(input, 11, "unexpected character");
        match err {
            JsonError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_column_counts_characters() {
        let input = "[\"é\",x]".as_bytes();
        let err = JsonError::parse_at(input, 6, "bad");
        match err {
            JsonError::Parse { column, offset, .. } => {
                assert_eq!(offset, 6);
                assert_eq!(column, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = JsonError::type_mismatch("string", "number");
        assert_eq!(err.to_string(), "type mismatch: expected string, found number");

        let err = JsonError::format("1.5", "i64");
        assert_eq!(err.to_string(), "number 1.5 is not a valid i64");
    }
}
