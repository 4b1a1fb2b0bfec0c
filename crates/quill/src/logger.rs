//! The logger: level gate, field merge, render, sink writes.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU8, Ordering};

use quill_core::{FieldMap, Format, Level, Record, fields, merge};

use crate::config::Config;
use crate::sink::{ConsoleSink, FileSink};

/// A leveled, structured logger.
///
/// Every record flows through one pipeline: minimum-level gate, merge of
/// persistent and call-site fields (call-site wins), render via the
/// configured [`Format`], then one atomic line write per enabled sink.
/// Records at [`Level::Fatal`] additionally terminate the process with
/// status 1 once all sink writes have completed.
///
/// Logging is fail-open: sink errors are reported as warnings and never
/// surface to the caller.
///
/// A `Logger` is `Send + Sync`; one instance may be shared freely across
/// threads.
///
/// # Example
///
/// ```
/// use quill::{fields, Format, Level, Logger};
///
/// let logger = Logger::new(Level::Info, Format::Text);
/// logger.info("application started");
/// logger.warn_with("cache miss", fields! { "key" => "user:42" });
/// ```
#[derive(Debug)]
pub struct Logger {
    min_level: AtomicU8,
    format: Format,
    fields: FieldMap,
    console: Option<ConsoleSink>,
    file: Option<FileSink>,
}

impl Logger {
    /// Console-only logger with the given minimum level and format.
    #[must_use]
    pub fn new(min_level: Level, format: Format) -> Self {
        Self::with_config(Config {
            level: min_level,
            format,
            ..Config::default()
        })
    }

    /// Build a logger from a full [`Config`].
    ///
    /// A configured file that cannot be opened disables the file sink for
    /// this instance and reports a warning; construction never fails.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        LoggerBuilder::from_config(config).build()
    }

    /// Start building a logger.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Minimum severity currently in effect.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_repr(self.min_level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    /// Change the minimum severity.
    pub fn set_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// The configured output format.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Fields attached to every record this logger emits.
    #[must_use]
    pub fn persistent_fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Derive a logger with the persistent field set **replaced**.
    ///
    /// The derived logger copies the current level and format by value
    /// and shares the parent's sink handles; later changes to either
    /// logger do not propagate to the other. Replacement (not merging) is
    /// the documented semantic; callers wanting cumulative fields merge
    /// manually first:
    ///
    /// ```
    /// use quill::{fields, merge, Format, Level, Logger};
    ///
    /// let base = Logger::new(Level::Info, Format::Text)
    ///     .with_fields(fields! { "service" => "api" });
    /// let request = base.with_fields(merge(
    ///     base.persistent_fields(),
    ///     fields! { "request_id" => "r-17" },
    /// ));
    /// # let _ = request;
    /// ```
    #[must_use]
    pub fn with_fields(&self, fields: FieldMap) -> Self {
        Self {
            min_level: AtomicU8::new(self.min_level.load(Ordering::Relaxed)),
            format: self.format,
            fields,
            console: self.console.clone(),
            file: self.file.clone(),
        }
    }

    /// Route one record through the pipeline.
    ///
    /// Records below the minimum level are dropped with no side effects.
    /// Records at [`Level::Fatal`] terminate the process with status 1
    /// after all sink writes complete.
    pub fn log(&self, level: Level, message: &str, call_site: FieldMap) {
        if level < self.level() {
            return;
        }

        let merged = merge(&self.fields, call_site);
        let record = Record::new(level, message, &merged);
        let line = self.format.renderer().render(&record);

        if let Some(console) = &self.console {
            let _ = console.write_line(&line);
        }
        if let Some(file) = &self.file {
            if let Err(err) = file.write_line(&line) {
                report_warning(
                    self.console.as_ref(),
                    self.format,
                    "file sink write failed",
                    fields! {
                        "path" => file.path().display().to_string(),
                        "error" => err.to_string(),
                    },
                );
            }
        }

        if level == Level::Fatal {
            process::exit(1);
        }
    }

    /// Log at [`Level::Debug`].
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message, FieldMap::new());
    }

    /// Log at [`Level::Debug`] with call-site fields.
    pub fn debug_with(&self, message: &str, fields: FieldMap) {
        self.log(Level::Debug, message, fields);
    }

    /// Log at [`Level::Info`].
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message, FieldMap::new());
    }

    /// Log at [`Level::Info`] with call-site fields.
    pub fn info_with(&self, message: &str, fields: FieldMap) {
        self.log(Level::Info, message, fields);
    }

    /// Log at [`Level::Warn`].
    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message, FieldMap::new());
    }

    /// Log at [`Level::Warn`] with call-site fields.
    pub fn warn_with(&self, message: &str, fields: FieldMap) {
        self.log(Level::Warn, message, fields);
    }

    /// Log at [`Level::Error`].
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message, FieldMap::new());
    }

    /// Log at [`Level::Error`] with call-site fields.
    pub fn error_with(&self, message: &str, fields: FieldMap) {
        self.log(Level::Error, message, fields);
    }

    /// Log at [`Level::Fatal`], then terminate the process with status 1.
    pub fn fatal(&self, message: &str) {
        self.log(Level::Fatal, message, FieldMap::new());
    }

    /// Log at [`Level::Fatal`] with call-site fields, then terminate the
    /// process with status 1.
    pub fn fatal_with(&self, message: &str, fields: FieldMap) {
        self.log(Level::Fatal, message, fields);
    }
}

/// Emit a logging-subsystem diagnostic as a Warn record.
///
/// Written to the console sink when one exists, stderr otherwise. Not
/// subject to the logger's level gate.
fn report_warning(
    console: Option<&ConsoleSink>,
    format: Format,
    message: &str,
    fields: FieldMap,
) {
    let record = Record::new(Level::Warn, message, &fields);
    let line = format.renderer().render(&record);
    match console {
        Some(sink) => {
            let _ = sink.write_line(&line);
        }
        None => eprintln!("{line}"),
    }
}

/// Builder for [`Logger`].
///
/// # Example
///
/// ```no_run
/// use quill::{Format, Level, Logger};
///
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .format(Format::Json)
///     .file("/var/log/app.log")
///     .build();
/// # let _ = logger;
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: Config,
    fields: FieldMap,
    console_sink: Option<ConsoleSink>,
}

impl LoggerBuilder {
    /// Create a builder with default settings (Info, text, console only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the minimum severity that will be emitted.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Set the output representation.
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Enable or disable the console sink.
    #[must_use]
    pub fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Append records to the file at `path`.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = Some(path.into());
        self
    }

    /// Set the persistent fields attached to every record.
    #[must_use]
    pub fn fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Route console output into the given sink instead of stdout.
    ///
    /// Tests pair this with
    /// [`CaptureSink`](crate::testing::CaptureSink) to observe output.
    #[must_use]
    pub fn console_sink(mut self, sink: ConsoleSink) -> Self {
        self.console_sink = Some(sink);
        self
    }

    /// Build the logger.
    ///
    /// Never fails: a file that cannot be opened is reported as a warning
    /// and file sinking stays disabled for this instance.
    #[must_use]
    pub fn build(self) -> Logger {
        let console = if self.config.console {
            Some(self.console_sink.unwrap_or_else(ConsoleSink::stdout))
        } else {
            None
        };

        let file = self.config.file.as_ref().and_then(|path| {
            match FileSink::open(path) {
                Ok(sink) => Some(sink),
                Err(err) => {
                    report_warning(
                        console.as_ref(),
                        self.config.format,
                        "failed to open log file",
                        fields! {
                            "path" => path.display().to_string(),
                            "error" => err.to_string(),
                        },
                    );
                    None
                }
            }
        });

        Logger {
            min_level: AtomicU8::new(self.config.level as u8),
            format: self.config.format,
            fields: self.fields,
            console,
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CaptureSink;
    use quill_core::Value;

    fn capture_logger(level: Level, format: Format) -> (Logger, CaptureSink) {
        let capture = CaptureSink::new();
        let logger = Logger::builder()
            .level(level)
            .format(format)
            .console_sink(capture.sink())
            .build();
        (logger, capture)
    }

    #[test]
    fn records_below_minimum_level_are_dropped() {
        let (logger, capture) = capture_logger(Level::Warn, Format::Text);

        logger.debug("dropped");
        logger.info("dropped");
        assert!(capture.output().is_empty());

        logger.warn("kept");
        logger.error("kept too");
        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[WARN] kept"));
        assert!(lines[1].contains("[ERROR] kept too"));
    }

    #[test]
    fn call_site_fields_override_persistent_fields() {
        let (logger, capture) = capture_logger(Level::Debug, Format::Json);
        let logger = logger.with_fields(fields! { "user_id" => 1234, "region" => "eu" });

        logger.info_with("x", fields! { "user_id" => 9999 });

        let parsed: Value = serde_json::from_str(&capture.lines()[0]).unwrap();
        assert_eq!(parsed["user_id"], 9999);
        assert_eq!(parsed["region"], "eu");
    }

    #[test]
    fn call_site_override_lasts_one_call_only() {
        let (logger, capture) = capture_logger(Level::Debug, Format::Json);
        let logger = logger.with_fields(fields! { "user_id" => 1234 });

        logger.info_with("first", fields! { "user_id" => 9999 });
        logger.info("second");

        let lines = capture.lines();
        let second: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["user_id"], 1234);
    }

    #[test]
    fn with_fields_replaces_instead_of_merging() {
        let base = Logger::builder()
            .console(false)
            .fields(fields! { "a" => 1 })
            .build();
        let derived = base.with_fields(fields! { "b" => 2 });

        assert!(!derived.persistent_fields().contains_key("a"));
        assert_eq!(derived.persistent_fields()["b"], Value::from(2));
        // the parent keeps its own set
        assert_eq!(base.persistent_fields()["a"], Value::from(1));
    }

    #[test]
    fn derived_logger_level_is_independent() {
        let base = Logger::builder().console(false).level(Level::Info).build();
        let derived = base.with_fields(FieldMap::new());

        derived.set_level(Level::Error);
        assert_eq!(base.level(), Level::Info);
        assert_eq!(derived.level(), Level::Error);

        base.set_level(Level::Debug);
        assert_eq!(derived.level(), Level::Error);
    }

    #[test]
    fn set_level_takes_effect_immediately() {
        let (logger, capture) = capture_logger(Level::Error, Format::Text);

        logger.info("dropped");
        logger.set_level(Level::Debug);
        logger.info("kept");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }

    #[test]
    fn unopenable_file_degrades_to_console_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let bad_path = dir.path().join("no-such-dir").join("app.log");

        let capture = CaptureSink::new();
        let logger = Logger::builder()
            .console_sink(capture.sink())
            .file(&bad_path)
            .build();

        assert!(capture.contains("failed to open log file"));
        assert!(capture.contains("[WARN]"));

        // logging still works through the console sink
        logger.info("still alive");
        assert!(capture.contains("still alive"));
    }

    #[test]
    fn builder_defaults_mirror_config_defaults() {
        let logger = Logger::builder().console(false).build();
        assert_eq!(logger.level(), Level::Info);
        assert_eq!(logger.format(), Format::Text);
        assert!(logger.persistent_fields().is_empty());
    }

    #[test]
    fn text_lines_have_no_trailing_space() {
        let (logger, capture) = capture_logger(Level::Debug, Format::Text);
        logger.info_with("msg", fields! { "a" => 1, "b" => 2 });

        let line = &capture.lines()[0];
        assert!(line.ends_with("a=1 b=2"));
    }
}
