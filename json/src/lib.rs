//! JSON document model for the Vault HTTP core.
//!
//! Request bodies are built and response payloads navigated through a
//! [`Value`] tree:
//!
//! - [`value`] - the six-variant value type, navigation and mutation
//! - [`map`] - insertion-ordered object members, duplicates preserved
//! - [`number`] - numbers kept as text with checked conversions
//! - [`lexer`] / [`parser`] - single-pass recursive descent parsing
//! - [`limits`] - input size and nesting depth bounds
//! - [`writer`] - compact and indented output
//!
//! # Example
//!
//! ```
//! use vault_json::{parse_str, write, Value, WriteStyle};
//!
//! let value = parse_str(r#"{"data":{"ttl":"1h"}}"#).unwrap();
//! assert_eq!(value.pointer("/data/ttl").unwrap().as_str().unwrap(), "1h");
//!
//! let mut body = Value::object();
//! body.set("increment", 3600).unwrap();
//! assert_eq!(write(&body, &WriteStyle::compact()), r#"{"increment":3600}"#);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod limits;
pub mod map;
pub mod number;
pub mod parser;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod value;
pub mod writer;

pub use error::{JsonError, JsonResult};
pub use limits::Limits;
pub use map::Map;
pub use number::Number;
pub use parser::{parse, parse_str, parse_with_limits};
pub use value::{Index, Value};
pub use writer::{write, write_to, WriteStyle};
