use crate::handler::{Encoding, FormatHandler};
use crate::logger::{Logger, set_default};
use crate::options::{LogOpt, LogOptions};

/// Assemble a logger from `opts` and install it as the process-wide default.
///
/// Without options this is JSON lines on stderr at `INFO`, no source. Each
/// call replaces whatever an earlier call installed. The first call also
/// routes `tracing` events to the default logger, see [`crate::bridge`].
///
/// ```rust
/// use attrlog::{Attr, Level, with_attr, with_level, with_text};
///
/// attrlog::setup([
///     with_text(),
///     with_level(Level::Debug),
///     with_attr(Attr::string("service", "billing")),
/// ]);
///
/// attrlog::info!("ready", attrlog::attrs::ip("10.0.0.7"));
/// ```
pub fn setup(opts: impl IntoIterator<Item = LogOpt>) {
    set_default(build(opts));
    crate::bridge::install();
}

/// Assemble a logger from `opts` without installing it.
pub fn build(opts: impl IntoIterator<Item = LogOpt>) -> Logger {
    let mut lo = LogOptions::new();
    lo.apply(opts);

    let LogOptions {
        writer,
        encoding,
        mut handler_opt,
        replacers,
        attrs,
    } = lo;

    handler_opt.replace_attr = LogOptions::dispatch_hook(replacers);

    let handler = match encoding {
        Encoding::Json => FormatHandler::json(writer, handler_opt),
        Encoding::Text => FormatHandler::text(writer, handler_opt),
    };

    let mut logger = Logger::new(handler);
    for attr in attrs {
        logger = logger.with([attr]);
    }
    logger
}
