//! Core types for the quill logging library.
//!
//! This crate holds the leaf pieces of the log record pipeline:
//!
//! - [`Level`] - ordered severity enumeration
//! - [`FieldMap`] / [`merge`] - structured fields with call-site precedence
//! - [`Record`] - the ephemeral (level, message, fields, timestamp) tuple
//! - [`Render`] with [`TextRenderer`] and [`JsonRenderer`], selected by
//!   [`Format`]
//!
//! Everything here is a pure function of its inputs; sinks, gating, and
//! process-wide state live in the `quill` crate.

#![forbid(unsafe_code)]

mod field;
mod level;
mod record;
mod render;

pub use field::{FieldMap, Value, merge};
pub use level::{Level, ParseLevelError};
pub use record::{Record, TIMESTAMP_FORMAT};
pub use render::{Format, JsonRenderer, ParseFormatError, Render, TextRenderer};

// `fields!` expands to `$crate::json!` so callers don't need their own
// serde_json dependency.
#[doc(hidden)]
pub use serde_json::json;
