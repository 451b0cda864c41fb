//! JSON text output.
//!
//! A single recursive descent mirroring the value tree. [`WriteStyle`]
//! selects compact output (no insignificant whitespace) or indented output
//! with one child per line. Object members are written in insertion order,
//! duplicates included, so that re-parsing yields an equal tree.

use std::fmt::{self, Write};

use crate::value::Value;

/// Output formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStyle {
    /// Indentation unit per nesting level; `None` selects compact output
    pub indent: Option<String>,
    /// Line separator used in indented output
    pub newline: String,
}

impl Default for WriteStyle {
    fn default() -> Self {
        Self::compact()
    }
}

impl WriteStyle {
    /// No insignificant whitespace.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent: None,
            newline: "\n".to_string(),
        }
    }

    /// Two-space indentation with `\n` line breaks.
    #[must_use]
    pub fn pretty() -> Self {
        Self::indented("  ")
    }

    /// Indented output with a custom indentation unit.
    #[must_use]
    pub fn indented(indent: impl Into<String>) -> Self {
        Self {
            indent: Some(indent.into()),
            newline: "\n".to_string(),
        }
    }

    /// Set the line separator.
    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }
}

/// Serialize a value to a string.
#[must_use]
pub fn write(value: &Value, style: &WriteStyle) -> String {
    let mut output = String::new();
    // writing into a String cannot fail
    let _ = write_to(&mut output, value, style);
    output
}

/// Serialize a value into any [`fmt::Write`] sink.
///
/// # Errors
///
/// Propagates errors from the sink.
pub fn write_to<W: Write + ?Sized>(out: &mut W, value: &Value, style: &WriteStyle) -> fmt::Result {
    Writer { out, style }.value(value, 0)
}

struct Writer<'a, W: Write + ?Sized> {
    out: &'a mut W,
    style: &'a WriteStyle,
}

impl<W: Write + ?Sized> Writer<'_, W> {
    fn value(&mut self, value: &Value, depth: usize) -> fmt::Result {
        match value {
            Value::Null => self.out.write_str("null"),
            Value::Bool(true) => self.out.write_str("true"),
            Value::Bool(false) => self.out.write_str("false"),
            Value::Number(n) => self.out.write_str(n.as_text()),
            Value::String(s) => write_string(self.out, s),
            Value::Array(list) => {
                if list.is_empty() {
                    return self.out.write_str("[]");
                }
                self.out.write_char('[')?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        self.out.write_char(',')?;
                    }
                    self.line_break(depth + 1)?;
                    self.value(item, depth + 1)?;
                }
                self.line_break(depth)?;
                self.out.write_char(']')
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return self.out.write_str("{}");
                }
                self.out.write_char('{')?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.write_char(',')?;
                    }
                    self.line_break(depth + 1)?;
                    write_string(self.out, key)?;
                    self.out.write_char(':')?;
                    if self.style.indent.is_some() {
                        self.out.write_char(' ')?;
                    }
                    self.value(item, depth + 1)?;
                }
                self.line_break(depth)?;
                self.out.write_char('}')
            }
        }
    }

    fn line_break(&mut self, depth: usize) -> fmt::Result {
        if let Some(indent) = &self.style.indent {
            self.out.write_str(&self.style.newline)?;
            for _ in 0..depth {
                self.out.write_str(indent)?;
            }
        }
        Ok(())
    }
}

/// Write a quoted string with minimal JSON escaping.
fn write_string<W: Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    let mut run_start = 0;
    for (i, ch) in s.char_indices() {
        let escaped = match ch {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\x08' => "\\b",
            '\x0C' => "\\f",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            c if c < '\x20' => {
                out.write_str(&s[run_start..i])?;
                write!(out, "\\u{:04x}", c as u32)?;
                run_start = i + 1;
                continue;
            }
            _ => continue,
        };
        out.write_str(&s[run_start..i])?;
        out.write_str(escaped)?;
        run_start = i + 1;
    }
    out.write_str(&s[run_start..])?;
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_compact_reproduces_input() {
        let text = r#"{"a":1,"b":[true,false,null]}"#;
        let value = parse_str(text).unwrap();
        assert_eq!(write(&value, &WriteStyle::compact()), text);
    }

    #[test]
    fn test_pretty_layout() {
        let value = parse_str(r#"{"a":1,"b":[true,{}],"c":[]}"#).unwrap();
        let expected = "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    {}\n  ],\n  \"c\": []\n}";
        assert_eq!(write(&value, &WriteStyle::pretty()), expected);
    }

    #[test]
    fn test_custom_indent_and_newline() {
        let value = parse_str("[1,2]").unwrap();
        let style = WriteStyle::indented("\t").with_newline("\r\n");
        assert_eq!(write(&value, &style), "[\r\n\t1,\r\n\t2\r\n]");
    }

    #[test]
    fn test_string_escaping() {
        let value = Value::from("q\"b\\s/\u{1}\n\té");
        assert_eq!(
            write(&value, &WriteStyle::compact()),
            "\"q\\\"b\\\\s/\\u0001\\n\\té\""
        );
    }

    #[test]
    fn test_duplicate_keys_written() {
        let text = r#"{"k":1,"k":2}"#;
        let value = parse_str(text).unwrap();
        assert_eq!(value.to_compact_string(), text);
    }

    #[test]
    fn test_scalars_at_root() {
        assert_eq!(write(&Value::Null, &WriteStyle::pretty()), "null");
        assert_eq!(write(&Value::from(-7), &WriteStyle::compact()), "-7");
    }
}
