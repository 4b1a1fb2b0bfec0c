//! `log` facade interop.
//!
//! [`LogBridge`] routes records produced by the standard [`log`] macros
//! through a [`Logger`], so libraries that know nothing about quill still
//! land in its sinks:
//!
//! ```no_run
//! use quill::{Format, Level, LogBridge, Logger};
//!
//! LogBridge::try_install(Logger::new(Level::Info, Format::Text));
//! log::info!("visible through quill");
//! ```

use log::{Metadata, SetLoggerError};

use quill_core::{FieldMap, Level, Value};

use crate::logger::Logger;

/// Adapter implementing [`log::Log`] on top of a [`Logger`].
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    /// Wrap a logger for facade use.
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Install as the process-wide `log` logger.
    ///
    /// Returns an error if a facade logger has already been set.
    pub fn install(logger: Logger) -> Result<(), SetLoggerError> {
        let max = facade_filter(logger.level());
        log::set_boxed_logger(Box::new(Self::new(logger)))?;
        log::set_max_level(max);
        Ok(())
    }

    /// Install, ignoring an already-set facade logger.
    pub fn try_install(logger: Logger) {
        let _ = Self::install(logger);
    }
}

/// Map a facade level onto quill's. `log` has no Fatal; Trace folds into
/// Debug.
fn level_from(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// The widest facade filter that still reaches `min_level`.
fn facade_filter(min_level: Level) -> log::LevelFilter {
    match min_level {
        Level::Debug => log::LevelFilter::Trace,
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error => log::LevelFilter::Error,
        // nothing the facade can produce reaches a Fatal-only logger
        Level::Fatal => log::LevelFilter::Off,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        level_from(metadata.level()) >= self.logger.level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut fields = FieldMap::new();
        if !record.target().is_empty() {
            fields.insert(
                "target".to_owned(),
                Value::String(record.target().to_owned()),
            );
        }
        self.logger
            .log(level_from(record.level()), &record.args().to_string(), fields);
    }

    fn flush(&self) {}
}
