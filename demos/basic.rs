//! Basic setup example.
//!
//! JSON lines on stderr, with the caller collapsed to `file:function:line`.

use attrlog::{Attr, Level};

fn main() {
    attrlog::builder()
        .with_level(Level::Debug)
        .with_simple_source()
        .with_attr(Attr::string("service", "basic-demo"))
        .init();

    attrlog::debug!("This is a debug message");
    attrlog::info!("This is an info message");
    attrlog::warn!("This is a warning message");

    // tracing events go through the same logger
    tracing::error!(error_code = 500, "This is an error message");
}
