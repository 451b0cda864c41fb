//! JSON lexer/tokenizer.
//!
//! Converts raw input bytes into tokens for the parser. The input is checked
//! for UTF-8 validity once up front; after that the lexer walks bytes and
//! copies unescaped runs of text directly into the output strings.

use crate::error::{JsonError, JsonResult};
use crate::limits::Limits;
use crate::number;

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped)
    String(String),
    /// Number value (raw text, grammar-checked)
    Number(String),
    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Eof => "end of input",
        }
    }
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the input exceeds `limits.max_input_size` or
    /// is not valid UTF-8.
    pub fn new(input: &'a [u8], limits: &Limits) -> JsonResult<Self> {
        if input.len() > limits.max_input_size {
            return Err(JsonError::parse_at(
                input,
                limits.max_input_size,
                format!("input exceeds {} bytes", limits.max_input_size),
            ));
        }

        let text = std::str::from_utf8(input)
            .map_err(|e| JsonError::parse_at(input, e.valid_up_to(), "invalid UTF-8"))?;

        Ok(Self {
            text,
            input,
            pos: 0,
        })
    }

    /// Get the current position in the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Build a parse error at `offset`.
    pub fn error_at(&self, offset: usize, message: impl Into<String>) -> JsonError {
        JsonError::parse_at(self.input, offset, message)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Read the next token and the offset where it starts.
    ///
    /// # Errors
    ///
    /// Returns a parse error for any character that cannot start or continue
    /// a token.
    pub fn next_token(&mut self) -> JsonResult<(Token, usize)> {
        self.skip_whitespace();
        let start = self.pos;

        let token = match self.peek() {
            None => Token::Eof,
            Some(b'{') => self.single(Token::LeftBrace),
            Some(b'}') => self.single(Token::RightBrace),
            Some(b'[') => self.single(Token::LeftBracket),
            Some(b']') => self.single(Token::RightBracket),
            Some(b':') => self.single(Token::Colon),
            Some(b',') => self.single(Token::Comma),
            Some(b'"') => self.read_string()?,
            Some(b'-' | b'0'..=b'9') => self.read_number()?,
            Some(b't') => self.read_literal("true", Token::True)?,
            Some(b'f') => self.read_literal("false", Token::False)?,
            Some(b'n') => self.read_literal("null", Token::Null)?,
            Some(_) => {
                let ch = self.text[start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(self.error_at(start, format!("unexpected character {ch:?}")));
            }
        };

        Ok((token, start))
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn read_string(&mut self) -> JsonResult<Token> {
        // opening quote
        self.pos += 1;

        let mut result = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(self.error_at(self.pos, "unterminated string")),
                Some(b'"') => {
                    result.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    result.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    let ch = self.read_escape_sequence()?;
                    result.push(ch);
                    run_start = self.pos;
                }
                Some(b) if b < 0x20 => {
                    return Err(self.error_at(self.pos, "control character in string"));
                }
                Some(_) => self.pos += 1,
            }
        }

        Ok(Token::String(result))
    }

    fn read_escape_sequence(&mut self) -> JsonResult<char> {
        let at = self.pos;
        match self.advance() {
            None => Err(self.error_at(at, "unterminated escape sequence")),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            Some(_) => Err(self.error_at(at, "invalid escape sequence")),
        }
    }

    fn read_unicode_escape(&mut self) -> JsonResult<char> {
        // points at the backslash of this escape, for error reporting
        let escape_start = self.pos - 2;
        let unit = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&unit) {
            let low_start = self.pos;
            if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                return Err(self.error_at(escape_start, "unpaired high surrogate"));
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error_at(low_start, "invalid low surrogate"));
            }
            let combined = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| self.error_at(escape_start, "invalid surrogate pair"));
        }

        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(self.error_at(escape_start, "unpaired low surrogate"));
        }

        char::from_u32(u32::from(unit))
            .ok_or_else(|| self.error_at(escape_start, "invalid unicode escape"))
    }

    fn read_hex4(&mut self) -> JsonResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let at = self.pos;
            let digit = match self.advance() {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                _ => return Err(self.error_at(at, "expected hex digit")),
            };
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    fn read_number(&mut self) -> JsonResult<Token> {
        let start = self.pos;
        let end = number::scan(self.input, start)
            .map_err(|(at, message)| self.error_at(at, message))?;
        self.pos = end;
        Ok(Token::Number(self.text[start..end].to_string()))
    }

    fn read_literal(&mut self, word: &str, token: Token) -> JsonResult<Token> {
        for &expected in word.as_bytes() {
            let at = self.pos;
            if self.advance() != Some(expected) {
                return Err(self.error_at(at, format!("invalid literal, expected '{word}'")));
            }
        }
        Ok(token)
    }
}
