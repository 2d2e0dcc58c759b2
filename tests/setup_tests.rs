//! Behaviour of the process-wide logger installed by `setup`.
//!
//! The default logger is global, so every test takes `GLOBAL` first.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use attrlog::attrs::{self, QueryValues};
use attrlog::{
    Attr, LEVEL_KEY, Level, SharedBuffer, TIME_KEY, Value, with_attr, with_level, with_replacer,
    with_simple_source, with_source, with_text, with_writer,
};

static GLOBAL: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

fn decode_all(buf: &SharedBuffer) -> Vec<serde_json::Value> {
    let out = buf.take();
    String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect()
}

#[test]
fn test_default_setup_writes_json_message() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([with_writer(buf.clone())]);

    attrlog::info!("Hello, World");
    attrlog::default_logger().info("Hello, World", []);

    let lines = decode_all(&buf);
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert_eq!(line["msg"], "Hello, World");
        assert!(line.get("source").is_none());
    }
}

#[test]
fn test_tracing_events_reach_installed_logger() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([with_writer(buf.clone())]);

    tracing::info!("Hello, World");

    let lines = decode_all(&buf);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "Hello, World");
}

#[test]
fn test_later_setup_replaces_earlier() {
    let _guard = lock();
    let first = SharedBuffer::new();
    let second = SharedBuffer::new();

    attrlog::setup([with_writer(first.clone())]);
    attrlog::setup([with_writer(second.clone()), with_text()]);
    attrlog::warn!("to the second sink");
    tracing::warn!("also to the second sink");

    assert!(first.is_empty());
    let out = second.contents_string();
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("msg=\"to the second sink\""), "{out}");
}

#[test]
fn test_attribute_constructors_round_trip() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([with_writer(buf.clone()), with_level(Level::Debug)]);

    let mut query = QueryValues::new();
    query.insert("q".to_string(), vec!["search".to_string()]);
    let mut extra = BTreeMap::new();
    extra.insert("data", "dummy");

    attrlog::debug!(
        "Hello, World",
        attrs::path("/"),
        attrs::query(&query),
        attrs::method("GET"),
        attrs::extra(&extra),
        attrs::user_agent("firefox"),
        attrs::ip("::1234"),
        attrs::status(200),
        attrs::latency(Duration::from_secs(1)),
        attrs::length(100),
    );

    let lines = decode_all(&buf);
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line["msg"], "Hello, World");
    assert_eq!(line["path"], "/");
    assert_eq!(line["query"], serde_json::json!({"q": ["search"]}));
    assert_eq!(line["method"], "GET");
    assert_eq!(line["extra"], serde_json::json!({"data": "dummy"}));
    assert_eq!(line["useragent"], "firefox");
    assert_eq!(line["ip"], "::1234");
    assert_eq!(line["status"], 200);
    assert_eq!(line["latency"].as_f64(), Some(1.0));
    assert_eq!(line["length"], 100);
}

#[test]
fn test_with_source() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([with_writer(buf.clone()), with_source()]);

    attrlog::warn!("Hello, World");
    attrlog::info!("Hello, World");

    for line in decode_all(&buf) {
        assert_eq!(line["msg"], "Hello, World");
        let file = line["source"]["file"].as_str().expect("source.file");
        assert!(file.ends_with("setup_tests.rs"), "source.file is wrong: {file}");
        assert_eq!(line["source"]["function"], module_path!());
    }
}

#[test]
fn test_with_level() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([with_writer(buf.clone()), with_level(Level::Warn)]);

    attrlog::debug!("Hello, World");
    assert!(buf.is_empty(), "should've omitted debug log, but logged");
    attrlog::info!("Hello, World");
    tracing::info!("Hello, World");
    assert!(buf.is_empty(), "should've omitted info log, but logged");

    attrlog::warn!("Hello, World");
    let lines = decode_all(&buf);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "Hello, World");
}

#[test]
fn test_with_replacers() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([
        with_writer(buf.clone()),
        with_level(Level::Debug),
        // replaces key only
        with_replacer(TIME_KEY, |a: Attr| a.with_key("timestamp")),
        // replaces both key and value
        with_replacer(LEVEL_KEY, |a: Attr| {
            let value = match a.value.as_str() {
                Some("DEBUG") => Value::from("debug"),
                Some("INFO") => Value::from("info"),
                _ => a.value,
            };
            Attr::new("lvl", value)
        }),
    ]);

    attrlog::debug!("Hello, World");
    attrlog::info!("Hello, World");
    attrlog::warn!("Hello, World");

    let lines = decode_all(&buf);
    let expected = ["debug", "info", "WARN"];
    assert_eq!(lines.len(), expected.len());
    for (line, level) in lines.iter().zip(expected) {
        assert_eq!(line["msg"], "Hello, World");
        assert_eq!(line["lvl"], level);
        let ts = line["timestamp"].as_str().expect("timestamp");
        assert!(!ts.starts_with("0000-"), "invalid timestamp, got: {ts}");
    }
}

#[test]
fn test_with_attribute() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([
        with_writer(buf.clone()),
        with_attr(Attr::string("service", "my-service")),
    ]);

    attrlog::warn!("Hello, World");
    attrlog::info!("Hello, World", attrs::path("/health"));
    tracing::error!("Hello, World");

    let lines = decode_all(&buf);
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line["msg"], "Hello, World");
        assert_eq!(line["service"], "my-service");
    }
}

#[test]
fn test_with_simple_source() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::setup([with_writer(buf.clone()), with_simple_source()]);

    let line = line!() + 1;
    attrlog::info!("Hello, World");
    // plain methods carry no function name, so the field is dropped
    attrlog::default_logger().info("Hello, World", []);

    let lines = decode_all(&buf);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0]["source"],
        format!("setup_tests.rs:{}:{}", module_path!(), line)
    );
    assert!(lines[1].get("source").is_none());
}

#[test]
fn test_builder_init_installs() {
    let _guard = lock();
    let buf = SharedBuffer::new();
    attrlog::builder()
        .with_writer(buf.clone())
        .with_text()
        .with_attr(Attr::int("pid", 7))
        .init();

    attrlog::error!("boom");

    let out = buf.contents_string();
    assert!(out.contains("level=ERROR msg=boom pid=7"), "{out}");
}
