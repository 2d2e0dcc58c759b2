//! Record encoding.
//!
//! A [`FormatHandler`] turns a [`Record`] into one line of JSON or `key=value`
//! text and writes it to its sink. Every attribute it emits, built-in or not,
//! first goes through the single [`HandlerOptions::replace_attr`] hook.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::attr::{Attr, LEVEL_KEY, MESSAGE_KEY, SOURCE_KEY, TIME_KEY};
use crate::level::Level;
use crate::record::Record;
use crate::writer::Sink;

/// Rewrite hook applied to every attribute at format time.
pub type ReplaceAttr = Arc<dyn Fn(Attr) -> Attr + Send + Sync>;

/// Destination-independent knobs of a handler.
#[derive(Clone)]
pub struct HandlerOptions {
    /// Emit the caller location under [`SOURCE_KEY`].
    pub add_source: bool,
    /// Minimum level; `None` means [`Level::Info`].
    pub level: Option<Level>,
    pub replace_attr: ReplaceAttr,
}

impl HandlerOptions {
    pub fn min_level(&self) -> Level {
        self.level.unwrap_or_default()
    }
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            add_source: false,
            level: None,
            replace_attr: Arc::new(|attr| attr),
        }
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("add_source", &self.add_source)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Output encoding of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Json,
    Text,
}

/// Encodes and writes records.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Whether a record at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Encode and write one record.
    fn handle(&self, record: &Record) -> io::Result<()>;

    /// A handler that also writes `attrs` on every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;
}

/// The JSON / text handler.
#[derive(Clone)]
pub struct FormatHandler {
    encoding: Encoding,
    sink: Arc<Sink>,
    options: HandlerOptions,
    /// Attributes bound by [`Handler::with_attrs`], already rewritten.
    bound: Vec<Attr>,
}

impl FormatHandler {
    pub fn new(encoding: Encoding, sink: Sink, options: HandlerOptions) -> Self {
        Self {
            encoding,
            sink: Arc::new(sink),
            options,
            bound: Vec::new(),
        }
    }

    pub fn json(sink: Sink, options: HandlerOptions) -> Self {
        Self::new(Encoding::Json, sink, options)
    }

    pub fn text(sink: Sink, options: HandlerOptions) -> Self {
        Self::new(Encoding::Text, sink, options)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    fn push(&self, fields: &mut Vec<Attr>, attr: Attr) {
        let attr = (self.options.replace_attr)(attr);
        if !attr.is_empty() {
            fields.push(attr);
        }
    }

    /// Every field of `record` in output order, after rewriting.
    pub fn fields(&self, record: &Record) -> Vec<Attr> {
        let mut fields = Vec::with_capacity(4 + self.bound.len() + record.attrs.len());

        self.push(&mut fields, Attr::time(TIME_KEY, record.time));
        self.push(&mut fields, Attr::string(LEVEL_KEY, record.level.as_str()));
        if self.options.add_source
            && let Some(source) = &record.source
        {
            self.push(&mut fields, Attr::source(SOURCE_KEY, source.clone()));
        }
        self.push(&mut fields, Attr::string(MESSAGE_KEY, record.message.as_str()));

        fields.extend(self.bound.iter().cloned());
        for attr in &record.attrs {
            self.push(&mut fields, attr.clone());
        }

        fields
    }

    /// Encode `record` as one newline-terminated line.
    pub fn encode(&self, record: &Record) -> io::Result<Vec<u8>> {
        let fields = self.fields(record);
        let mut line = Vec::with_capacity(128);
        match self.encoding {
            Encoding::Json => encode_json(&fields, &mut line)?,
            Encoding::Text => encode_text(&fields, &mut line)?,
        }
        Ok(line)
    }
}

impl fmt::Debug for FormatHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatHandler")
            .field("encoding", &self.encoding)
            .field("options", &self.options)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

impl Handler for FormatHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.options.min_level()
    }

    fn handle(&self, record: &Record) -> io::Result<()> {
        let line = self.encode(record)?;
        // One write per record; interleaving is up to the sink.
        let sink: &Sink = &self.sink;
        let mut writer = sink.make_writer();
        writer.write_all(&line)?;
        writer.flush()
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        for attr in attrs {
            self.push(&mut derived.bound, attr);
        }
        Arc::new(derived)
    }
}

fn encode_json(fields: &[Attr], out: &mut Vec<u8>) -> io::Result<()> {
    out.push(b'{');
    for (i, attr) in fields.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        serde_json::to_writer(&mut *out, &attr.key)?;
        out.push(b':');
        serde_json::to_writer(&mut *out, &attr.value)?;
    }
    out.extend_from_slice(b"}\n");
    Ok(())
}

fn encode_text(fields: &[Attr], out: &mut Vec<u8>) -> io::Result<()> {
    for (i, attr) in fields.iter().enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        write_text_token(out, &attr.key)?;
        out.push(b'=');
        write_text_token(out, &attr.value.to_string())?;
    }
    out.push(b'\n');
    Ok(())
}

fn write_text_token(out: &mut Vec<u8>, token: &str) -> io::Result<()> {
    if needs_quoting(token) {
        write!(out, "{token:?}")
    } else {
        out.write_all(token.as_bytes())
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}
