//! Routing `tracing` events into a [`Logger`].
//!
//! After [`setup`](crate::setup) the global `tracing` subscriber is a
//! registry carrying a [`LoggerLayer`], so `tracing::info!(user_id = 7, "...")`
//! is encoded by whatever logger is installed at that moment. Fields keep their
//! kind (`i64`, `u64`, `f64`, `bool`, strings); anything recorded through
//! `Debug` becomes a string. The `message` field becomes the record message.

use std::fmt;
use std::sync::Once;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::attr::Attr;
use crate::level::Level;
use crate::logger::{Logger, default_logger};
use crate::record::Record;
use crate::value::Source;

const MESSAGE_FIELD: &str = "message";

static INSTALL: Once = Once::new();

/// Layer that turns `tracing` events into records.
#[derive(Debug, Clone, Default)]
pub struct LoggerLayer {
    /// `None` follows the process-wide default logger.
    logger: Option<Logger>,
}

impl LoggerLayer {
    /// Forward to the process-wide default logger, looked up per event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward to `logger` only.
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    fn logger(&self) -> Logger {
        match &self.logger {
            Some(logger) => logger.clone(),
            None => default_logger(),
        }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let level = Level::from(*meta.level());
        let logger = self.logger();
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let source = Source::new(
            meta.module_path().unwrap_or_default(),
            meta.file().unwrap_or_default(),
            meta.line().unwrap_or_default(),
        );
        let record = Record::new(level, visitor.message)
            .with_source(source)
            .with_attrs(visitor.attrs);
        logger.log_record(&record);
    }
}

/// Register a registry with a default-following [`LoggerLayer`] as the global
/// `tracing` subscriber. Runs at most once; if another subscriber already owns
/// the slot it stays in place.
pub fn install() {
    INSTALL.call_once(|| {
        if let Err(e) = tracing_subscriber::registry()
            .with(LoggerLayer::new())
            .try_init()
        {
            tracing::debug!("tracing events not routed to the default logger: {e}");
        }
    });
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    attrs: Vec<Attr>,
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.attrs.push(Attr::float(field.name(), value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.attrs.push(Attr::int(field.name(), value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.attrs.push(Attr::uint(field.name(), value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.attrs.push(Attr::bool(field.name(), value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE_FIELD {
            self.message = value.to_string();
        } else {
            self.attrs.push(Attr::string(field.name(), value));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.attrs.push(Attr::string(field.name(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            self.message = format!("{value:?}");
        } else {
            self.attrs.push(Attr::string(field.name(), format!("{value:?}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{with_level, with_simple_source, with_source, with_writer};
    use crate::setup::build;
    use crate::writer::SharedBuffer;

    fn capture(logger: Logger, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::with_logger(logger));
        tracing::subscriber::with_default(subscriber, f);
    }

    fn decode(buf: &SharedBuffer) -> serde_json::Value {
        serde_json::from_slice(&buf.take()).expect("valid json line")
    }

    #[test]
    fn test_event_message_and_fields() {
        let buf = SharedBuffer::new();
        capture(build([with_writer(buf.clone())]), || {
            tracing::info!(user_id = 123, ratio = 0.5, ok = true, action = "login", "User logged in");
        });

        let json = decode(&buf);
        assert_eq!(json["msg"], "User logged in");
        assert_eq!(json["level"], "INFO");
        assert_eq!(json["user_id"], 123);
        assert_eq!(json["ratio"], 0.5);
        assert_eq!(json["ok"], true);
        assert_eq!(json["action"], "login");
    }

    #[test]
    fn test_event_debug_fields_become_strings() {
        let buf = SharedBuffer::new();
        capture(build([with_writer(buf.clone())]), || {
            tracing::warn!(peers = ?vec![1, 2], "formatted {}", 42);
        });

        let json = decode(&buf);
        assert_eq!(json["msg"], "formatted 42");
        assert_eq!(json["peers"], "[1, 2]");
    }

    #[test]
    fn test_event_below_threshold_is_dropped() {
        let buf = SharedBuffer::new();
        capture(build([with_writer(buf.clone()), with_level(Level::Warn)]), || {
            tracing::debug!("nope");
            tracing::info!("nope");
            tracing::trace!("nope");
        });
        assert!(buf.is_empty());
    }

    #[test]
    fn test_event_source_from_metadata() {
        let buf = SharedBuffer::new();
        capture(build([with_writer(buf.clone()), with_source()]), || {
            tracing::error!("boom");
        });

        let json = decode(&buf);
        assert_eq!(json["source"]["function"], module_path!());
        assert!(json["source"]["file"].as_str().unwrap().ends_with("bridge.rs"));
    }

    #[test]
    fn test_event_simple_source() {
        let buf = SharedBuffer::new();
        let line = line!() + 2;
        capture(build([with_writer(buf.clone()), with_simple_source()]), || {
            tracing::info!("where am I");
        });

        let json = decode(&buf);
        assert_eq!(
            json["source"],
            format!("bridge.rs:{}:{}", module_path!(), line)
        );
    }
}
