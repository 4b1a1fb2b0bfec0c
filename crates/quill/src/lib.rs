//! quill - leveled, structured logging with console and file sinks.
//!
//! A record is a (level, message, fields) triple. Each log call runs one
//! synchronous pipeline: minimum-level gate, field merge (call-site wins
//! over persistent), render (text or JSON), then one atomic line write
//! per enabled sink. Logging is fail-open: sink failures degrade to
//! warnings and never reach the caller. The one deliberate exception is
//! that records at [`Level::Fatal`] terminate the process with status 1
//! after all sink writes complete.
//!
//! # Quick start
//!
//! ```
//! use quill::{fields, Format, Level, Logger};
//!
//! let logger = Logger::new(Level::Info, Format::Text);
//! logger.info("application started");
//! logger.warn_with("disk nearly full", fields! { "free_mb" => 212 });
//!
//! // derive a logger with bound fields (replaces, never merges)
//! let request = logger.with_fields(fields! { "request_id" => "r-17" });
//! request.error("upstream timed out");
//! ```
//!
//! # The shared logger
//!
//! A process-wide instance is available through free functions, built
//! lazily on first use (Info, text, console only). Only its level can be
//! changed afterwards:
//!
//! ```
//! quill::configure(quill::Level::Debug);
//! quill::debug("now visible");
//! quill::info_with("startup", quill::fields! { "version" => "1.0.0" });
//! ```
//!
//! # `log` facade
//!
//! Code using the standard `log` macros can be routed through quill by
//! installing a [`LogBridge`].

#![forbid(unsafe_code)]

mod bridge;
mod config;
mod global;
mod logger;
mod sink;
pub mod testing;

pub use bridge::LogBridge;
pub use config::Config;
pub use global::{
    configure, debug, debug_with, error, error_with, fatal, fatal_with, info, info_with,
    logger, warn, warn_with,
};
pub use logger::{Logger, LoggerBuilder};
pub use sink::{ConsoleSink, FileSink};

// The record pipeline lives in quill-core; re-export the whole surface so
// `quill` is the only dependency callers need.
pub use quill_core::{
    FieldMap, Format, JsonRenderer, Level, ParseFormatError, ParseLevelError, Record,
    Render, TIMESTAMP_FORMAT, TextRenderer, Value, fields, merge,
};
