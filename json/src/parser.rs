//! Recursive descent JSON parser.
//!
//! One token of lookahead, a single forward pass, no backtracking. Errors
//! point at the token that could not be accepted.

use crate::error::JsonResult;
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;
use crate::map::Map;
use crate::number::Number;
use crate::value::Value;

/// Parse a JSON document from bytes with default limits.
///
/// # Errors
///
/// Returns [`crate::JsonError::Parse`] with the position of the first
/// offending character.
pub fn parse(input: &[u8]) -> JsonResult<Value> {
    parse_with_limits(input, &Limits::default())
}

/// Parse a JSON document from text with default limits.
///
/// # Errors
///
/// Returns [`crate::JsonError::Parse`] with the position of the first
/// offending character.
pub fn parse_str(input: &str) -> JsonResult<Value> {
    parse(input.as_bytes())
}

/// Parse a JSON document with explicit limits.
///
/// # Errors
///
/// Returns [`crate::JsonError::Parse`] for malformed input or when a limit
/// is exceeded.
pub fn parse_with_limits(input: &[u8], limits: &Limits) -> JsonResult<Value> {
    Parser::new(input, limits)?.parse()
}

/// JSON parser over a token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_pos: usize,
    max_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    ///
    /// # Errors
    ///
    /// Fails if the input is rejected by the lexer before the first token.
    pub fn new(input: &'a [u8], limits: &Limits) -> JsonResult<Self> {
        let mut lexer = Lexer::new(input, limits)?;
        let (current, current_pos) = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            current_pos,
            max_depth: limits.max_depth,
            depth: 0,
        })
    }

    /// Parse the whole input as one value.
    ///
    /// # Errors
    ///
    /// Fails on malformed input or trailing content after the value.
    pub fn parse(mut self) -> JsonResult<Value> {
        let value = self.parse_value()?;

        if self.current != Token::Eof {
            return Err(self.unexpected("end of input"));
        }

        Ok(value)
    }

    fn advance(&mut self) -> JsonResult<()> {
        let (token, pos) = self.lexer.next_token()?;
        self.current = token;
        self.current_pos = pos;
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> crate::JsonError {
        self.lexer.error_at(
            self.current_pos,
            format!("expected {expected}, found {}", self.current.describe()),
        )
    }

    fn parse_value(&mut self) -> JsonResult<Value> {
        let value = match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Null => Value::Null,
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::String(s) => Value::String(s),
            Token::Number(text) => Value::Number(Number::from_validated(text)),
            Token::LeftBrace => return self.parse_object(),
            Token::LeftBracket => return self.parse_array(),
            other => {
                self.current = other;
                return Err(self.unexpected("value"));
            }
        };
        self.advance()?;
        Ok(value)
    }

    fn enter(&mut self) -> JsonResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.lexer.error_at(
                self.current_pos,
                format!("nesting deeper than {} levels", self.max_depth),
            ));
        }
        Ok(())
    }

    fn parse_object(&mut self) -> JsonResult<Value> {
        self.enter()?;
        // consume '{'
        self.advance()?;

        let mut map = Map::new();

        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match std::mem::replace(&mut self.current, Token::Eof) {
                Token::String(s) => s,
                other => {
                    let trailing_comma = other == Token::RightBrace;
                    self.current = other;
                    return Err(if trailing_comma {
                        self.lexer.error_at(self.current_pos, "trailing comma in object")
                    } else {
                        self.unexpected("string key")
                    });
                }
            };
            self.advance()?;

            if self.current != Token::Colon {
                return Err(self.unexpected("':'"));
            }
            self.advance()?;

            let value = self.parse_value()?;
            map.append(key, value);

            match self.current {
                Token::Comma => self.advance()?,
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> JsonResult<Value> {
        self.enter()?;
        // consume '['
        self.advance()?;

        let mut list = Vec::new();

        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Array(list));
        }

        loop {
            if self.current == Token::RightBracket {
                return Err(self
                    .lexer
                    .error_at(self.current_pos, "trailing comma in array"));
            }
            list.push(self.parse_value()?);

            match self.current {
                Token::Comma => self.advance()?,
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(list))
    }
}
