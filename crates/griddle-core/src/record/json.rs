//! Schema-agnostic JSON record type.
//!
//! This module provides [`JsonRecord`], a record backed by a JSON object,
//! for sources whose schema is only known at runtime.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;

use crate::error::{Error, SourceError};

use super::Record;

/// A record backed by a JSON object.
///
/// The inner value is guaranteed to be a JSON object; this is enforced at
/// construction and deserialization time. Scalar fields are exposed through
/// [`Record`] in their text form; nested values are exposed as compact JSON.
///
/// # Example
///
/// ```
/// use griddle_core::{JsonRecord, Record};
/// use serde_json::json;
///
/// let record = JsonRecord::new(json!({"name": "Alice", "age": 30})).unwrap();
/// assert_eq!(record.field("name").unwrap(), "Alice");
/// assert_eq!(record.field("age").unwrap(), "30");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord(Value);

impl JsonRecord {
    /// Create a new `JsonRecord` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        if !value.is_object() {
            return Err(SourceError::Decode {
                message: "record must be a JSON object".to_string(),
            }
            .into());
        }
        Ok(Self(value))
    }

    /// Field names in object order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        // Safe: validated at construction
        self.0.as_object().unwrap().keys().map(String::as_str)
    }

    /// Get a field as a raw JSON value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a reference to the inner JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume and return the inner JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Record for JsonRecord {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            nested => Some(Cow::Owned(nested.to_string())),
        }
    }
}

impl Serialize for JsonRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        JsonRecord::new(value).map_err(serde::de::Error::custom)
    }
}
