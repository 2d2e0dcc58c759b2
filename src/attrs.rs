//! Attribute constructors for request logs.
//!
//! Each helper returns an [`Attr`] under a fixed key, so request logs written
//! from different places line up. Inputs are recorded as given; nothing is
//! validated.
//!
//! ```rust
//! use std::time::Duration;
//! use attrlog::attrs;
//!
//! let attr = attrs::latency(Duration::from_millis(1500));
//! assert_eq!(attr.key, "latency");
//! assert_eq!(attr.value.as_f64(), Some(1.5));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::attr::Attr;
use crate::value::Value;

/// Query parameters: each name maps to every value it was given.
pub type QueryValues = BTreeMap<String, Vec<String>>;

/// Keys used by the request-log constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKey {
    Path,
    Query,
    Method,
    Extra,
    UserAgent,
    Ip,
    Status,
    Latency,
    Length,
}

impl LogKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKey::Path => "path",
            LogKey::Query => "query",
            LogKey::Method => "method",
            LogKey::Extra => "extra",
            LogKey::UserAgent => "useragent",
            LogKey::Ip => "ip",
            LogKey::Status => "status",
            LogKey::Latency => "latency",
            LogKey::Length => "length",
        }
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request path.
pub fn path(path: &str) -> Attr {
    Attr::string(LogKey::Path.as_str(), path)
}

/// Query parameters, encoded as an object of string arrays.
pub fn query(query: &QueryValues) -> Attr {
    Attr::new(LogKey::Query.as_str(), Value::any(query))
}

/// Request method.
pub fn method(method: &str) -> Attr {
    Attr::string(LogKey::Method.as_str(), method)
}

/// Free-form payload.
pub fn extra<T: Serialize + ?Sized>(value: &T) -> Attr {
    Attr::any(LogKey::Extra.as_str(), value)
}

pub fn user_agent(ua: &str) -> Attr {
    Attr::string(LogKey::UserAgent.as_str(), ua)
}

pub fn ip(ip: &str) -> Attr {
    Attr::string(LogKey::Ip.as_str(), ip)
}

/// Response status code.
pub fn status(status_code: i64) -> Attr {
    Attr::int(LogKey::Status.as_str(), status_code)
}

/// Request latency in seconds, as a float.
pub fn latency(d: Duration) -> Attr {
    Attr::float(LogKey::Latency.as_str(), d.as_secs_f64())
}

/// Response length.
pub fn length(l: i64) -> Attr {
    Attr::int(LogKey::Length.as_str(), l)
}
