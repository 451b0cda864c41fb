//! JSON numbers kept as their source text.
//!
//! The text is validated against the JSON number grammar once, at
//! construction; conversions to machine types happen on demand and fail with
//! [`JsonError::Format`] when the text does not fit the target.

use std::fmt;
use std::str::FromStr;

use crate::error::{JsonError, JsonResult};

/// A JSON number in its original textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    text: String,
}

impl Number {
    /// Create a number from text, validating the JSON number grammar.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Format`] if `text` is not a complete JSON number.
    pub fn from_text(text: impl Into<String>) -> JsonResult<Self> {
        let text = text.into();
        match scan(text.as_bytes(), 0) {
            Ok(end) if end == text.len() => Ok(Self { text }),
            _ => Err(JsonError::format(text, "JSON number")),
        }
    }

    /// Wrap text the lexer has already validated.
    pub(crate) const fn from_validated(text: String) -> Self {
        Self { text }
    }

    /// Create a number from a float. Returns `None` for NaN and infinities.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| Self {
            text: value.to_string(),
        })
    }

    /// The original text.
    #[must_use]
    pub fn as_text(&self) -> &str {
        &self.text
    }

    /// True when the text has no fraction and no exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
    }

    /// Convert to `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Format`] if the text is not an integer in range.
    pub fn as_i32(&self) -> JsonResult<i32> {
        self.parse_integer("i32")
    }

    /// Convert to `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Format`] if the text is not an integer in range.
    pub fn as_i64(&self) -> JsonResult<i64> {
        self.parse_integer("i64")
    }

    /// Convert to `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Format`] if the text is not a non-negative integer in range.
    pub fn as_u64(&self) -> JsonResult<u64> {
        self.parse_integer("u64")
    }

    /// Convert to `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Format`] if the value overflows `f32`.
    pub fn as_f32(&self) -> JsonResult<f32> {
        self.text
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| JsonError::format(self.text.clone(), "f32"))
    }

    /// Convert to `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Format`] if the value overflows `f64`.
    pub fn as_f64(&self) -> JsonResult<f64> {
        self.text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| JsonError::format(self.text.clone(), "f64"))
    }

    fn parse_integer<T: FromStr>(&self, target: &'static str) -> JsonResult<T> {
        if !self.is_integer() {
            return Err(JsonError::format(self.text.clone(), target));
        }
        self.text
            .parse::<T>()
            .map_err(|_| JsonError::format(self.text.clone(), target))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Number {
    type Err = JsonError;

    fn from_str(s: &str) -> JsonResult<Self> {
        Self::from_text(s)
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self { text: value.to_string() }
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Scan a JSON number starting at `start`.
///
/// Returns the end offset on success, or the offset of the offending byte
/// and a description on failure.
pub(crate) fn scan(input: &[u8], start: usize) -> Result<usize, (usize, &'static str)> {
    let mut pos = start;
    let at = |pos: usize| input.get(pos).copied();

    if at(pos) == Some(b'-') {
        pos += 1;
    }

    match at(pos) {
        Some(b'0') => {
            pos += 1;
            if let Some(b'0'..=b'9') = at(pos) {
                return Err((pos, "leading zeros are not allowed"));
            }
        }
        Some(b'1'..=b'9') => {
            while let Some(b'0'..=b'9') = at(pos) {
                pos += 1;
            }
        }
        _ => return Err((pos, "expected digit")),
    }

    if at(pos) == Some(b'.') {
        pos += 1;
        if !matches!(at(pos), Some(b'0'..=b'9')) {
            return Err((pos, "expected digit after decimal point"));
        }
        while let Some(b'0'..=b'9') = at(pos) {
            pos += 1;
        }
    }

    if let Some(b'e' | b'E') = at(pos) {
        pos += 1;
        if let Some(b'+' | b'-') = at(pos) {
            pos += 1;
        }
        if !matches!(at(pos), Some(b'0'..=b'9')) {
            return Err((pos, "expected digit in exponent"));
        }
        while let Some(b'0'..=b'9') = at(pos) {
            pos += 1;
        }
    }

    Ok(pos)
}
