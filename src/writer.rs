use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Type-erased output destination of a handler.
pub type Sink = BoxMakeWriter;

/// Erase any [`MakeWriter`] into a [`Sink`].
pub fn sink<W>(make_writer: W) -> Sink
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    BoxMakeWriter::new(make_writer)
}

/// The default destination.
pub fn stderr_sink() -> Sink {
    BoxMakeWriter::new(io::stderr)
}

/// Open `path` for appending, creating it and any missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// A sink writing to a file opened by [`open_log_file`].
pub fn file_sink(path: &Path) -> io::Result<Sink> {
    let file = open_log_file(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// In-memory sink shared between clones.
///
/// Every clone appends to the same buffer, so a test can hand one clone to
/// the logger and read records back through another.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn buf(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.buf().clone()
    }

    /// Buffer contents as text, replacing invalid UTF-8.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buf()).into_owned()
    }

    /// Drain the buffer, returning what it held.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buf())
    }

    pub fn clear(&self) {
        self.buf().clear();
    }

    pub fn len(&self) -> usize {
        self.buf().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
