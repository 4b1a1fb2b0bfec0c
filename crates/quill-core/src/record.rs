//! Ephemeral log records.

use chrono::Local;

use crate::{FieldMap, Level};

/// Timestamp pattern shared by every renderer: local time, second
/// granularity, `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single log record, borrowed for the duration of one render.
///
/// Records are created fresh per log call and consumed immediately by a
/// renderer; they are never retained.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Severity of this record.
    pub level: Level,
    /// The log message.
    pub message: &'a str,
    /// Merged persistent and call-site fields.
    pub fields: &'a FieldMap,
    /// Pre-formatted timestamp (see [`TIMESTAMP_FORMAT`]).
    pub timestamp: String,
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current local time.
    #[must_use]
    pub fn new(level: Level, message: &'a str, fields: &'a FieldMap) -> Self {
        Self::with_timestamp(
            level,
            message,
            fields,
            Local::now().format(TIMESTAMP_FORMAT).to_string(),
        )
    }

    /// Create a record with a caller-supplied timestamp.
    ///
    /// Renderer output is a pure function of the record, so injecting the
    /// timestamp makes exact-output assertions possible.
    #[must_use]
    pub fn with_timestamp(
        level: Level,
        message: &'a str,
        fields: &'a FieldMap,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message,
            fields,
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stamps_the_shared_pattern() {
        let fields = FieldMap::new();
        let record = Record::new(Level::Info, "hello", &fields);

        // 2026-08-06 12:34:56
        assert_eq!(record.timestamp.len(), 19);
        assert_eq!(&record.timestamp[4..5], "-");
        assert_eq!(&record.timestamp[7..8], "-");
        assert_eq!(&record.timestamp[10..11], " ");
        assert_eq!(&record.timestamp[13..14], ":");
        assert_eq!(&record.timestamp[16..17], ":");
    }

    #[test]
    fn with_timestamp_is_verbatim() {
        let fields = FieldMap::new();
        let record =
            Record::with_timestamp(Level::Warn, "x", &fields, "2026-01-02 03:04:05");
        assert_eq!(record.timestamp, "2026-01-02 03:04:05");
        assert_eq!(record.level, Level::Warn);
        assert_eq!(record.message, "x");
    }
}
