//! Typed session attribute values.
//!
//! Session attributes arrive as untyped JSON and are echoed back to the
//! platform on every turn. [`AttributeValue`] gives them a closed shape so
//! handlers match on variants rather than probing raw JSON, while the untagged
//! serde representation keeps the wire format byte-for-byte identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Ordered mapping of session attribute names to values.
///
/// A `BTreeMap` keeps serialised responses deterministic.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single session attribute value.
///
/// # Example
///
/// ```
/// use skillgate_types::AttributeValue;
///
/// let value = AttributeValue::from("jazz");
/// assert_eq!(value.as_str(), Some("jazz"));
///
/// let json = serde_json::to_string(&AttributeValue::from(3_i64)).unwrap();
/// assert_eq!(json, "3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// JSON `null`.
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// An integer or floating point number.
    Number(Number),
    /// A UTF-8 string.
    String(String),
    /// An ordered list of values.
    List(Vec<AttributeValue>),
    /// A nested mapping.
    Map(Attributes),
}

impl AttributeValue {
    /// Returns `true` when the value is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the number as `i64` when it is an integer in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as `u64` when it is a non-negative integer in range.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            _ => None,
        }
    }

    /// Returns the number as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the nested mapping, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Attributes> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Null => Self::Null,
            AttributeValue::Bool(flag) => Self::Bool(flag),
            AttributeValue::Number(number) => Self::Number(number),
            AttributeValue::String(text) => Self::String(text),
            AttributeValue::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            AttributeValue::Map(map) => Self::Object(
                map.into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

/// Non-finite floats have no JSON representation and become `null`.
impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Vec<Self>> for AttributeValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl From<Attributes> for AttributeValue {
    fn from(value: Attributes) -> Self {
        Self::Map(value)
    }
}
