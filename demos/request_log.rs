//! Request logging example.
//!
//! Text output with renamed built-in keys and the request-log attributes.

use std::time::{Duration, Instant};

use attrlog::attrs::{self, QueryValues};
use attrlog::{Attr, LEVEL_KEY, TIME_KEY, Value, with_level, with_replacer, with_text};

fn main() {
    attrlog::setup([
        with_text(),
        with_level(attrlog::Level::Debug),
        with_replacer(TIME_KEY, |a: Attr| a.with_key("ts")),
        with_replacer(LEVEL_KEY, |a: Attr| {
            let lower = a.value.as_str().map(str::to_ascii_lowercase);
            match lower {
                Some(level) => Attr::new("lvl", Value::from(level)),
                None => a,
            }
        }),
    ]);

    let started = Instant::now();
    std::thread::sleep(Duration::from_millis(15));

    let mut query = QueryValues::new();
    query.insert("q".to_string(), vec!["rust".to_string(), "logging".to_string()]);

    attrlog::info!(
        "request served",
        attrs::method("GET"),
        attrs::path("/search"),
        attrs::query(&query),
        attrs::ip("127.0.0.1"),
        attrs::user_agent("curl/8.5.0"),
        attrs::status(200),
        attrs::length(512),
        attrs::latency(started.elapsed()),
    );
}
