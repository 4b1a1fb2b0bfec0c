//! Process-wide shared logger.
//!
//! The shared instance is built lazily, exactly once, even under
//! concurrent first access. Its renderer and sink configuration are fixed
//! for the life of the process; only the minimum level can change
//! afterwards, via [`configure`].

use std::sync::OnceLock;

use quill_core::{FieldMap, Level};

use crate::config::Config;
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The shared logger.
///
/// First access constructs the default instance: Info level, text format,
/// console only.
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::with_config(Config::default()))
}

/// Set the shared logger's minimum level.
///
/// If the shared instance does not exist yet it is constructed with
/// `level` as its initial minimum; otherwise the existing instance's
/// level is updated in place.
pub fn configure(level: Level) {
    let logger = GLOBAL.get_or_init(|| {
        Logger::with_config(Config {
            level,
            ..Config::default()
        })
    });
    logger.set_level(level);
}

/// Log at [`Level::Debug`] through the shared logger.
pub fn debug(message: &str) {
    logger().debug(message);
}

/// Log at [`Level::Debug`] with call-site fields through the shared logger.
pub fn debug_with(message: &str, fields: FieldMap) {
    logger().debug_with(message, fields);
}

/// Log at [`Level::Info`] through the shared logger.
pub fn info(message: &str) {
    logger().info(message);
}

/// Log at [`Level::Info`] with call-site fields through the shared logger.
pub fn info_with(message: &str, fields: FieldMap) {
    logger().info_with(message, fields);
}

/// Log at [`Level::Warn`] through the shared logger.
pub fn warn(message: &str) {
    logger().warn(message);
}

/// Log at [`Level::Warn`] with call-site fields through the shared logger.
pub fn warn_with(message: &str, fields: FieldMap) {
    logger().warn_with(message, fields);
}

/// Log at [`Level::Error`] through the shared logger.
pub fn error(message: &str) {
    logger().error(message);
}

/// Log at [`Level::Error`] with call-site fields through the shared logger.
pub fn error_with(message: &str, fields: FieldMap) {
    logger().error_with(message, fields);
}

/// Log at [`Level::Fatal`] through the shared logger, then terminate the
/// process with status 1.
pub fn fatal(message: &str) {
    logger().fatal(message);
}

/// Log at [`Level::Fatal`] with call-site fields through the shared
/// logger, then terminate the process with status 1.
pub fn fatal_with(message: &str, fields: FieldMap) {
    logger().fatal_with(message, fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The shared instance is process-wide state, so everything about it
    // is asserted in one sequential test.
    #[test]
    fn configure_builds_once_then_only_moves_the_level() {
        configure(Level::Debug);
        let first = logger() as *const Logger;
        assert_eq!(logger().level(), Level::Debug);

        configure(Level::Warn);
        assert_eq!(logger().level(), Level::Warn);

        // same instance, not a rebuild
        assert_eq!(first, logger() as *const Logger);
    }
}
