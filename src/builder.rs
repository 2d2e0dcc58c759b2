//! Builder pattern for assembling and installing a logger.
//!
//! [`LogBuilder`] collects the same steps [`setup`] takes, in call order, so a
//! chain of methods and a list of options behave identically.
//!
//! # Example
//!
//! ```rust
//! use attrlog::{Attr, Level};
//!
//! attrlog::builder()
//!     .with_level(Level::Debug)
//!     .with_simple_source()
//!     .with_attr(Attr::string("service", "my-service"))
//!     .init();
//!
//! attrlog::debug!("ready");
//! ```

use std::fmt;

use tracing_subscriber::fmt::MakeWriter;

use crate::config::LogConfig;
use crate::options::{self, LogOpt, LogOptions};
use crate::setup::{build, setup};
use crate::{Attr, Level, Logger, Result};

/// A fluent collection of option steps.
#[derive(Default)]
pub struct LogBuilder {
    opts: Vec<LogOpt>,
}

impl LogBuilder {
    /// An empty builder: JSON on stderr at `INFO`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder seeded with the steps described by `config`.
    ///
    /// # Errors
    ///
    /// Fails when the level or format is unknown or the log file cannot be
    /// opened.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        Ok(Self {
            opts: config.to_options()?,
        })
    }

    /// Append an arbitrary step.
    pub fn with_option(mut self, opt: LogOpt) -> Self {
        self.opts.push(opt);
        self
    }

    pub fn with_writer<W>(self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.with_option(options::with_writer(writer))
    }

    pub fn with_text(self) -> Self {
        self.with_option(options::with_text())
    }

    pub fn with_json(self) -> Self {
        self.with_option(options::with_json())
    }

    pub fn with_source(self) -> Self {
        self.with_option(options::with_source())
    }

    pub fn with_level(self, level: Level) -> Self {
        self.with_option(options::with_level(level))
    }

    pub fn with_replacer<F>(self, key: impl Into<String>, replacer: F) -> Self
    where
        F: Fn(Attr) -> Attr + Send + Sync + 'static,
    {
        self.with_option(options::with_replacer(key, replacer))
    }

    pub fn with_attr(self, attr: Attr) -> Self {
        self.with_option(options::with_attr(attr))
    }

    pub fn with_simple_source(self) -> Self {
        self.with_option(options::with_simple_source())
    }

    /// The configuration record the collected steps produce.
    pub fn options(self) -> LogOptions {
        let mut lo = LogOptions::new();
        lo.apply(self.opts);
        lo
    }

    /// Assemble the logger without installing it.
    pub fn build(self) -> Logger {
        build(self.opts)
    }

    /// Assemble the logger and install it as the process-wide default.
    pub fn init(self) {
        setup(self.opts)
    }
}

impl fmt::Debug for LogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBuilder")
            .field("steps", &self.opts.len())
            .finish()
    }
}
