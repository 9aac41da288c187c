//! Extra attributes attached to a log entry
//!
//! This module provides:
//! - `FieldValue`: a loosely typed attribute value
//! - `LogContext`: the open key/value mapping carried by every entry
//!
//! One key is recognised by the formatters: [`RAW_PAYLOAD_KEY`], a secondary
//! text block rendered underneath the message.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Extra attribute holding the raw payload text
pub const RAW_PAYLOAD_KEY: &str = "raw_msg";

/// Value type for extra attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Borrow the value as text, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Open mapping of extra attributes for a single entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogContext {
    fields: HashMap<String, FieldValue>,
}

impl LogContext {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy in every field from `defaults` that this context does not set.
    ///
    /// Entry-level fields take priority over the defaults.
    pub fn merge_missing(&mut self, defaults: &LogContext) {
        for (key, value) in &defaults.fields {
            if !self.fields.contains_key(key) {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }

    /// The raw payload text, when present and string-valued
    pub fn raw_payload(&self) -> Option<&str> {
        self.fields.get(RAW_PAYLOAD_KEY).and_then(FieldValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_creation() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.raw_payload(), None);
    }

    #[test]
    fn test_log_context_with_fields() {
        let ctx = LogContext::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(ctx.fields().len(), 3);
        assert_eq!(ctx.get("user_id"), Some(&FieldValue::Int(123)));
    }

    #[test]
    fn test_raw_payload_requires_string() {
        let ctx = LogContext::new().with_field(RAW_PAYLOAD_KEY, "line one\nline two");
        assert_eq!(ctx.raw_payload(), Some("line one\nline two"));

        let ctx = LogContext::new().with_field(RAW_PAYLOAD_KEY, 42);
        assert_eq!(ctx.raw_payload(), None);
    }

    #[test]
    fn test_merge_missing_priority() {
        let defaults = LogContext::new()
            .with_field("key", "adapter_value")
            .with_field("service", "api");

        let mut ctx = LogContext::new().with_field("key", "entry_value");
        ctx.merge_missing(&defaults);

        assert_eq!(ctx.fields().len(), 2);
        assert_eq!(ctx.get("key").and_then(FieldValue::as_str), Some("entry_value"));
        assert_eq!(ctx.get("service").and_then(FieldValue::as_str), Some("api"));
    }
}
