use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A flexible property value. Rules read these as flags most of the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A boolean flag such as `is_locked`.
    Boolean(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    String(String),
}

impl PropertyValue {
    /// Truthiness of the value: booleans as-is, numbers when non-zero,
    /// strings when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Open-ended, string-keyed property map carried by every entity.
///
/// New rules introduce new keys freely; nothing here knows about
/// `is_locked` or `is_royal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(HashMap<String, PropertyValue>);

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value for a key, if set.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Read a key as a flag, falling back to `default` when unset.
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        self.0.get(key).map_or(default, PropertyValue::is_truthy)
    }

    /// Set a value, returning the previous one.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.0.remove(key)
    }
}
