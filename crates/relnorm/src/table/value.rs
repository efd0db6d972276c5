//! Cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a table.
///
/// `Null` is the missing-value marker and compares unequal to every legal
/// value. Values are totally ordered (`Null < Int < Text`) so id columns can
/// be sorted and any value can key a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Whole number.
    Int(i64),
    /// Free text.
    Text(String),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Returns true if this is the missing-value marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string content of a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content of an `Int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Coerce the value to text.
    ///
    /// Integers render in decimal; `Null` renders as `missing_marker`.
    pub fn as_text(&self, missing_marker: &str) -> String {
        match self {
            Value::Null => missing_marker.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Interpret a raw field read from a delimited file.
    ///
    /// A field equal to one of `null_markers` becomes `Null`. A field that
    /// is the canonical decimal form of an `i64` becomes `Int`; anything
    /// else, including `007` and `+5`, is kept as text so writing it back
    /// reproduces the field exactly.
    pub fn parse(raw: &str, null_markers: &[String]) -> Self {
        if null_markers.iter().any(|m| m == raw) {
            return Value::Null;
        }
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => Value::Int(n),
            _ => Value::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
