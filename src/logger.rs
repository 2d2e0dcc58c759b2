//! Logger values and the process-wide default.

use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::attr::Attr;
use crate::handler::{FormatHandler, Handler, HandlerOptions};
use crate::level::Level;
use crate::record::Record;
use crate::value::Source;
use crate::writer::stderr_sink;

static DEFAULT_LOGGER: Lazy<RwLock<Logger>> = Lazy::new(|| RwLock::new(Logger::fallback()));

/// Front end over a [`Handler`]. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Text to stderr at the default level; in place until the first setup.
    fn fallback() -> Self {
        Self::new(FormatHandler::text(stderr_sink(), HandlerOptions::default()))
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// A child logger that writes `attrs` on every record.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Self {
            handler: self.handler.with_attrs(attrs),
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Hand a prepared record to the handler if its level passes.
    pub fn log_record(&self, record: &Record) {
        if !self.enabled(record.level) {
            return;
        }
        // Write failures are the sink's concern, the caller never sees them.
        let _ = self.handler.handle(record);
    }

    /// Log with an explicit source; used by the logging macros.
    pub fn log_at(
        &self,
        level: Level,
        source: Source,
        msg: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let record = Record::new(level, msg)
            .with_source(source)
            .with_attrs(attrs);
        self.log_record(&record);
    }

    /// Log at `level`. The source carries the caller's file and line but no
    /// function name; the macros fill that in with the module path.
    #[track_caller]
    pub fn log(&self, level: Level, msg: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        let caller = Location::caller();
        self.log_at(
            level,
            Source::new("", caller.file(), caller.line()),
            msg,
            attrs,
        );
    }

    #[track_caller]
    pub fn debug(&self, msg: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Debug, msg, attrs);
    }

    #[track_caller]
    pub fn info(&self, msg: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Info, msg, attrs);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Warn, msg, attrs);
    }

    #[track_caller]
    pub fn error(&self, msg: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Error, msg, attrs);
    }
}

/// The currently installed process-wide logger.
pub fn default_logger() -> Logger {
    DEFAULT_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide logger. Later calls win.
pub fn set_default(logger: Logger) {
    *DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = logger;
}
