//! Output sinks.
//!
//! A sink receives one fully rendered line per record. Each line is
//! written with a single `write_all` behind a mutex, so concurrent
//! loggers sharing a sink never interleave partial lines.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Console sink, writing to stdout by default.
///
/// Cloning shares the underlying writer, so a derived logger keeps
/// writing through the same handle as its parent.
#[derive(Clone)]
pub struct ConsoleSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl ConsoleSink {
    /// Sink over the process stdout stream.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Sink over a custom writer (tests capture output this way).
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write one rendered line plus newline as a single operation.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.write_all(&buf)?;
        guard.flush()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

/// Append-mode file sink.
///
/// Cloning shares the open descriptor: parent and derived loggers append
/// through the same handle, serialized by the shared mutex.
#[derive(Clone)]
pub struct FileSink {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl FileSink {
    /// Open `path` in append/create mode.
    ///
    /// Existing content is never truncated.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    /// The path this sink appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one rendered line plus newline as a single operation.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        guard.write_all(&buf)
    }
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn console_sink_writes_whole_lines() {
        let capture = crate::testing::CaptureSink::new();
        let sink = capture.sink();

        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        assert_eq!(capture.lines(), ["first", "second"]);
    }

    #[test]
    fn file_sink_appends_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let sink = FileSink::open(&path).unwrap();
        sink.write_line("one").unwrap();
        drop(sink);

        let reopened = FileSink::open(&path).unwrap();
        reopened.write_line("two").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn file_sink_open_fails_on_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.log");
        assert!(FileSink::open(path).is_err());
    }

    #[test]
    fn cloned_file_sinks_share_the_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");

        let sink = FileSink::open(&path).unwrap();
        let clone = sink.clone();
        sink.write_line("a").unwrap();
        clone.write_line("b").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a\nb\n");
    }
}
