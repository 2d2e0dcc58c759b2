//! Logger options.
//!
//! Each `with_*` function returns a [`LogOpt`], a step that mutates the
//! [`LogOptions`] record being assembled by [`setup`](crate::setup). Steps run
//! in the order given; when two steps touch the same field the later one wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::attr::{Attr, SOURCE_KEY};
use crate::handler::{Encoding, HandlerOptions, ReplaceAttr};
use crate::level::Level;
use crate::writer::{Sink, sink, stderr_sink};

/// Per-key attribute rewrite.
pub type AttrReplacer = Arc<dyn Fn(Attr) -> Attr + Send + Sync>;

/// One configuration step.
pub type LogOpt = Box<dyn FnOnce(&mut LogOptions) + Send>;

/// Configuration assembled by the option steps.
pub struct LogOptions {
    pub(crate) writer: Sink,
    pub(crate) encoding: Encoding,
    pub(crate) handler_opt: HandlerOptions,
    pub(crate) replacers: HashMap<String, AttrReplacer>,
    pub(crate) attrs: Vec<Attr>,
}

impl LogOptions {
    /// JSON to stderr, default level, no source, no replacers, no attributes.
    pub fn new() -> Self {
        Self {
            writer: stderr_sink(),
            encoding: Encoding::Json,
            handler_opt: HandlerOptions::default(),
            replacers: HashMap::new(),
            attrs: Vec::new(),
        }
    }

    /// Run `opts` in order.
    pub fn apply(&mut self, opts: impl IntoIterator<Item = LogOpt>) {
        for opt in opts {
            opt(self);
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn handler_options(&self) -> &HandlerOptions {
        &self.handler_opt
    }

    pub fn replacer(&self, key: &str) -> Option<&AttrReplacer> {
        self.replacers.get(key)
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// The single rewrite hook: dispatch on the attribute key, pass
    /// unregistered keys through unchanged.
    pub(crate) fn dispatch_hook(replacers: HashMap<String, AttrReplacer>) -> ReplaceAttr {
        Arc::new(move |attr: Attr| match replacers.get(&attr.key) {
            Some(replacer) => replacer(attr),
            None => attr,
        })
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.replacers.keys().collect();
        keys.sort();
        f.debug_struct("LogOptions")
            .field("encoding", &self.encoding)
            .field("handler_opt", &self.handler_opt)
            .field("replacers", &keys)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}

/// Write records to `writer` instead of stderr.
pub fn with_writer<W>(writer: W) -> LogOpt
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let writer = sink(writer);
    Box::new(move |lo: &mut LogOptions| lo.writer = writer)
}

/// Plain `key=value` text instead of JSON.
pub fn with_text() -> LogOpt {
    Box::new(|lo: &mut LogOptions| lo.encoding = Encoding::Text)
}

/// JSON lines (the default).
pub fn with_json() -> LogOpt {
    Box::new(|lo: &mut LogOptions| lo.encoding = Encoding::Json)
}

/// Record the caller location under `source`.
pub fn with_source() -> LogOpt {
    Box::new(|lo: &mut LogOptions| lo.handler_opt.add_source = true)
}

/// Drop records below `level`.
pub fn with_level(level: Level) -> LogOpt {
    Box::new(move |lo: &mut LogOptions| lo.handler_opt.level = Some(level))
}

/// Rewrite attributes named `key` with `replacer`.
///
/// The replacer may change the key, the value, or return [`Attr::empty`] to
/// drop the field. Registering a second replacer for the same key replaces
/// the first.
pub fn with_replacer<F>(key: impl Into<String>, replacer: F) -> LogOpt
where
    F: Fn(Attr) -> Attr + Send + Sync + 'static,
{
    let key = key.into();
    let replacer: AttrReplacer = Arc::new(replacer);
    Box::new(move |lo: &mut LogOptions| {
        lo.replacers.insert(key, replacer);
    })
}

/// Attach `attr` to every record.
pub fn with_attr(attr: Attr) -> LogOpt {
    Box::new(move |lo: &mut LogOptions| lo.attrs.push(attr))
}

/// Enable source capture and write it as a single `file:function:line`
/// string.
pub fn with_simple_source() -> LogOpt {
    Box::new(|lo: &mut LogOptions| {
        lo.handler_opt.add_source = true;
        lo.replacers
            .insert(SOURCE_KEY.to_string(), Arc::new(simple_source));
    })
}

/// Collapse a source attribute into `"<base file>:<function>:<line>"`.
///
/// Sources without a function name are dropped. Values that are not sources
/// pass through untouched.
pub fn simple_source(attr: Attr) -> Attr {
    let Some(src) = attr.value.as_source() else {
        return attr;
    };
    // TODO: sources logged through plain `Logger` methods have no function
    // name and vanish here; fall back to `file:line` once callers agree on it.
    if src.function.is_empty() {
        return Attr::empty();
    }

    let collapsed = format!("{}:{}:{}", src.base_file(), src.function, src.line);
    Attr::string(SOURCE_KEY, collapsed)
}
