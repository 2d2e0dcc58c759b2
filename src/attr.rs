use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;

use crate::value::{Source, Value};

/// Key of the record timestamp.
pub const TIME_KEY: &str = "time";
/// Key of the record severity.
pub const LEVEL_KEY: &str = "level";
/// Key of the record message.
pub const MESSAGE_KEY: &str = "msg";
/// Key of the caller location.
pub const SOURCE_KEY: &str = "source";

/// A single key/value field of a log record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The attribute handlers skip. Returning it from a replacer removes the
    /// field from the output.
    pub fn empty() -> Self {
        Self {
            key: String::new(),
            value: Value::Any(serde_json::Value::Null),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn time(key: impl Into<String>, value: OffsetDateTime) -> Self {
        Self::new(key, Value::Time(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn source(key: impl Into<String>, value: Source) -> Self {
        Self::new(key, Value::Source(value))
    }

    /// Attribute carrying an arbitrary serializable payload.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, payload: &T) -> Self {
        Self::new(key, Value::any(payload))
    }

    /// Same value under a different key.
    pub fn with_key(self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: self.value,
        }
    }
}
