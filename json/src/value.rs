//! JSON value tree.
//!
//! [`Value`] is a sum type over the six JSON shapes. Accessors that downcast
//! to a specific shape fail with [`JsonError::TypeMismatch`] instead of
//! coercing, so navigating an unexpected payload is always an explicit error.
//!
//! Equality is structural and order-sensitive for arrays and objects alike;
//! numbers compare by their text.

use std::fmt;

use crate::error::{JsonError, JsonResult};
use crate::map::Map;
use crate::number::Number;
use crate::writer::{write_to, WriteStyle};

/// A JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept as text
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<Value>),
    /// JSON object, insertion-ordered with duplicates preserved
    Object(Map),
}

impl Value {
    /// Create an empty object.
    #[must_use]
    pub const fn object() -> Self {
        Self::Object(Map::new())
    }

    /// Create an empty array.
    #[must_use]
    pub const fn array() -> Self {
        Self::Array(Vec::new())
    }

    /// Returns the type name for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns true if this is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this is a boolean.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns true if this is a number.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if this is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns true if this is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns true if this is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// The boolean held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_bool(&self) -> JsonResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// The string held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_str(&self) -> JsonResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// The number held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_number(&self) -> JsonResult<&Number> {
        match self {
            Self::Number(n) => Ok(n),
            other => Err(other.mismatch("number")),
        }
    }

    /// The array held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_array(&self) -> JsonResult<&Vec<Self>> {
        match self {
            Self::Array(a) => Ok(a),
            other => Err(other.mismatch("array")),
        }
    }

    /// The array held by this value, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_array_mut(&mut self) -> JsonResult<&mut Vec<Self>> {
        match self {
            Self::Array(a) => Ok(a),
            other => Err(other.mismatch("array")),
        }
    }

    /// The object held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_object(&self) -> JsonResult<&Map> {
        match self {
            Self::Object(o) => Ok(o),
            other => Err(other.mismatch("object")),
        }
    }

    /// The object held by this value, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for any other variant.
    pub fn as_object_mut(&mut self) -> JsonResult<&mut Map> {
        match self {
            Self::Object(o) => Ok(o),
            other => Err(other.mismatch("object")),
        }
    }

    /// Number converted to `i32`.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] if not a number, [`JsonError::Format`] if
    /// out of range.
    pub fn as_i32(&self) -> JsonResult<i32> {
        self.as_number()?.as_i32()
    }

    /// Number converted to `i64`.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] if not a number, [`JsonError::Format`] if
    /// out of range.
    pub fn as_i64(&self) -> JsonResult<i64> {
        self.as_number()?.as_i64()
    }

    /// Number converted to `u64`.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] if not a number, [`JsonError::Format`] if
    /// out of range.
    pub fn as_u64(&self) -> JsonResult<u64> {
        self.as_number()?.as_u64()
    }

    /// Number converted to `f32`.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] if not a number, [`JsonError::Format`] if
    /// out of range.
    pub fn as_f32(&self) -> JsonResult<f32> {
        self.as_number()?.as_f32()
    }

    /// Number converted to `f64`.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] if not a number, [`JsonError::Format`] if
    /// out of range.
    pub fn as_f64(&self) -> JsonResult<f64> {
        self.as_number()?.as_f64()
    }

    /// Look up an object member (`&str`) or array element (`usize`).
    ///
    /// A missing key or position yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] when the index kind does not fit
    /// this value's variant.
    pub fn get<I: Index>(&self, index: I) -> JsonResult<Option<&Self>> {
        index.index_into(self)
    }

    /// Mutable form of [`Value::get`].
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] when the index kind does not fit
    /// this value's variant.
    pub fn get_mut<I: Index>(&mut self, index: I) -> JsonResult<Option<&mut Self>> {
        index.index_into_mut(self)
    }

    /// Remove an object member (every duplicate) or array element.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] when the index kind does not fit
    /// this value's variant.
    pub fn remove<I: Index>(&mut self, index: I) -> JsonResult<Option<Self>> {
        index.remove_from(self)
    }

    /// Set an object member, replacing the last member with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] if this is not an object.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Self>) -> JsonResult<Option<Self>> {
        Ok(self.as_object_mut()?.set(key, value.into()))
    }

    /// Append to an array.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] if this is not an array.
    pub fn add(&mut self, value: impl Into<Self>) -> JsonResult<()> {
        self.as_array_mut()?.push(value.into());
        Ok(())
    }

    /// Insert into an array at `index`, shifting later elements.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] if this is not an array,
    /// [`JsonError::IndexOutOfBounds`] if `index` is past the end.
    pub fn insert(&mut self, index: usize, value: impl Into<Self>) -> JsonResult<()> {
        let list = self.as_array_mut()?;
        if index > list.len() {
            return Err(JsonError::IndexOutOfBounds {
                index,
                len: list.len(),
            });
        }
        list.insert(index, value.into());
        Ok(())
    }

    /// Number of elements or members.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for scalars.
    pub fn size(&self) -> JsonResult<usize> {
        match self {
            Self::Array(a) => Ok(a.len()),
            Self::Object(o) => Ok(o.len()),
            other => Err(other.mismatch("array or object")),
        }
    }

    /// True when an array or object has no children.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::TypeMismatch`] for scalars.
    pub fn is_empty(&self) -> JsonResult<bool> {
        self.size().map(|n| n == 0)
    }

    /// Navigate with an RFC 6901 JSON pointer such as `/data/keys/0`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Self> {
        if pointer.is_empty() {
            return Some(self);
        }
        if !pointer.starts_with('/') {
            return None;
        }
        pointer
            .split('/')
            .skip(1)
            .map(|token| token.replace("~1", "/").replace("~0", "~"))
            .try_fold(self, |target, token| match target {
                Self::Object(map) => map.get(&token),
                Self::Array(list) => parse_pointer_index(&token).and_then(|i| list.get(i)),
                _ => None,
            })
    }

    /// Compact JSON text.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        crate::writer::write(self, &WriteStyle::compact())
    }

    /// Two-space indented JSON text.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        crate::writer::write(self, &WriteStyle::pretty())
    }

    fn mismatch(&self, expected: &'static str) -> JsonError {
        JsonError::type_mismatch(expected, self.type_name())
    }
}

fn parse_pointer_index(token: &str) -> Option<usize> {
    if token.starts_with('+') || (token.starts_with('0') && token.len() > 1) {
        return None;
    }
    token.parse().ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_to(f, self, &WriteStyle::compact())
    }
}

/// Types usable as a position in a [`Value`]: `usize` for arrays, strings
/// for objects.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'v>(&self, value: &'v Value) -> JsonResult<Option<&'v Value>>;

    #[doc(hidden)]
    fn index_into_mut<'v>(&self, value: &'v mut Value) -> JsonResult<Option<&'v mut Value>>;

    #[doc(hidden)]
    fn remove_from(&self, value: &mut Value) -> JsonResult<Option<Value>>;
}

impl Index for usize {
    fn index_into<'v>(&self, value: &'v Value) -> JsonResult<Option<&'v Value>> {
        Ok(value.as_array()?.get(*self))
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> JsonResult<Option<&'v mut Value>> {
        Ok(value.as_array_mut()?.get_mut(*self))
    }

    fn remove_from(&self, value: &mut Value) -> JsonResult<Option<Value>> {
        let list = value.as_array_mut()?;
        Ok((*self < list.len()).then(|| list.remove(*self)))
    }
}

impl Index for str {
    fn index_into<'v>(&self, value: &'v Value) -> JsonResult<Option<&'v Value>> {
        Ok(value.as_object()?.get(self))
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> JsonResult<Option<&'v mut Value>> {
        Ok(value.as_object_mut()?.get_mut(self))
    }

    fn remove_from(&self, value: &mut Value) -> JsonResult<Option<Value>> {
        Ok(value.as_object_mut()?.remove(self))
    }
}

impl Index for String {
    fn index_into<'v>(&self, value: &'v Value) -> JsonResult<Option<&'v Value>> {
        self.as_str().index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> JsonResult<Option<&'v mut Value>> {
        self.as_str().index_into_mut(value)
    }

    fn remove_from(&self, value: &mut Value) -> JsonResult<Option<Value>> {
        self.as_str().remove_from(value)
    }
}

impl<T: Index + ?Sized> Index for &T {
    fn index_into<'v>(&self, value: &'v Value) -> JsonResult<Option<&'v Value>> {
        (**self).index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> JsonResult<Option<&'v mut Value>> {
        (**self).index_into_mut(value)
    }

    fn remove_from(&self, value: &mut Value) -> JsonResult<Option<Value>> {
        (**self).remove_from(value)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}
