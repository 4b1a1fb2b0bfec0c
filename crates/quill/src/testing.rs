//! Test utilities.
//!
//! [`CaptureSink`] stands in for stdout so tests can assert on rendered
//! output without touching the real console.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::sink::ConsoleSink;

/// In-memory console capture.
///
/// Hand its [`sink`](CaptureSink::sink) to
/// [`LoggerBuilder::console_sink`](crate::LoggerBuilder::console_sink),
/// log, then inspect the captured lines:
///
/// ```
/// use quill::testing::CaptureSink;
/// use quill::{Level, Logger};
///
/// let capture = CaptureSink::new();
/// let logger = Logger::builder()
///     .level(Level::Info)
///     .console_sink(capture.sink())
///     .build();
///
/// logger.info("captured");
/// assert!(capture.contains("[INFO] captured"));
/// ```
#[derive(Debug, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CaptureSink {
    /// Create an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A console sink writing into this capture buffer.
    #[must_use]
    pub fn sink(&self) -> ConsoleSink {
        ConsoleSink::with_writer(BufferWriter(self.buffer.clone()))
    }

    /// Everything captured so far, as one string.
    #[must_use]
    pub fn output(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Captured output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(ToOwned::to_owned).collect()
    }

    /// Whether the captured output contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.output().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_accumulates_lines_in_order() {
        let capture = CaptureSink::new();
        let sink = capture.sink();

        sink.write_line("alpha").unwrap();
        sink.write_line("beta").unwrap();

        assert_eq!(capture.lines(), ["alpha", "beta"]);
        assert!(capture.contains("alp"));
        assert!(!capture.contains("gamma"));
    }

    #[test]
    fn multiple_sinks_share_one_buffer() {
        let capture = CaptureSink::new();
        capture.sink().write_line("from the first").unwrap();
        capture.sink().write_line("from the second").unwrap();

        assert_eq!(capture.lines().len(), 2);
    }
}
