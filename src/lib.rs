//! # Attrlog
//!
//! Assemble a process-wide structured logger from a list of options.
//!
//! ## Features
//!
//! - JSON lines (default) or `key=value` text, to stderr or any `MakeWriter`
//! - A single minimum level
//! - Caller location, raw or collapsed to `file:function:line`
//! - Per-key attribute rewriting (rename, reformat or drop any field,
//!   including `time`, `level`, `msg` and `source`)
//! - Attributes attached to every record
//! - `tracing` events routed to the installed logger
//!
//! ## Example
//!
//! ```rust
//! use attrlog::{Attr, Level, attrs, with_attr, with_level, with_replacer};
//!
//! attrlog::setup([
//!     with_level(Level::Debug),
//!     with_replacer("time", |a: Attr| a.with_key("timestamp")),
//!     with_attr(Attr::string("service", "my-service")),
//! ]);
//!
//! attrlog::info!("request served", attrs::method("GET"), attrs::status(200));
//! tracing::warn!(retries = 3, "upstream slow");
//! ```

pub mod attr;
pub mod attrs;
pub mod bridge;
pub mod builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod options;
pub mod record;
pub mod setup;
pub mod value;
pub mod writer;

pub use attr::{Attr, LEVEL_KEY, MESSAGE_KEY, SOURCE_KEY, TIME_KEY};
pub use builder::LogBuilder;
pub use config::LogConfig;
pub use error::{Error, Result};
pub use handler::{Encoding, FormatHandler, Handler, HandlerOptions};
pub use level::Level;
pub use logger::{Logger, default_logger, set_default};
pub use options::{
    AttrReplacer, LogOpt, LogOptions, with_attr, with_json, with_level, with_replacer,
    with_simple_source, with_source, with_text, with_writer,
};
pub use record::Record;
pub use setup::{build, setup};
pub use value::{Source, Value};
pub use writer::SharedBuffer;

/// Start a [`LogBuilder`].
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}

/// Log a message with attributes at an explicit level.
///
/// The source records `file!()`, `line!()` and `module_path!()`. Without a
/// leading `logger: <expr>,` the process-wide default logger is used.
///
/// ```rust
/// use attrlog::{Level, attrs};
///
/// attrlog::log!(Level::Info, "served", attrs::path("/"), attrs::status(200));
///
/// let logger = attrlog::builder().build();
/// attrlog::log!(logger: logger, Level::Warn, "slow");
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $msg:expr $(, $attr:expr)* $(,)?) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.enabled(level) {
            let attrs: ::std::vec::Vec<$crate::Attr> = ::std::vec![$($attr),*];
            logger.log_at(
                level,
                $crate::Source::new(::std::module_path!(), ::std::file!(), ::std::line!()),
                $msg,
                attrs,
            );
        }
    }};
    ($level:expr, $msg:expr $(, $attr:expr)* $(,)?) => {
        $crate::log!(logger: $crate::default_logger(), $level, $msg $(, $attr)*)
    };
}

/// [`log!`] at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Trace, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Trace, $($rest)+)
    };
}

/// [`log!`] at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Debug, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Debug, $($rest)+)
    };
}

/// [`log!`] at [`Level::Info`].
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Info, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Info, $($rest)+)
    };
}

/// [`log!`] at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Warn, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Warn, $($rest)+)
    };
}

/// [`log!`] at [`Level::Error`].
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Error, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Error, $($rest)+)
    };
}
