//! Record renderers.
//!
//! A [`Render`] implementation turns a [`Record`] into its final
//! single-line representation. Two concrete renderers exist, selected at
//! logger construction time via [`Format`]:
//!
//! - [`TextRenderer`] - `[<timestamp>] [<LEVEL>] <message> - k=v ...`
//! - [`JsonRenderer`] - one flat JSON object per record
//!
//! Rendering never fails: a value that cannot be serialized degrades to a
//! best-effort textual form instead of aborting the log call.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Record;

/// Output format selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable single-line text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Format {
    /// The renderer implementing this format.
    #[must_use]
    pub fn renderer(self) -> &'static dyn Render {
        match self {
            Self::Text => &TextRenderer,
            Self::Json => &JsonRenderer,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Error returned when a format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatError(String);

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized log format: {:?}", self.0)
    }
}

impl std::error::Error for ParseFormatError {}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ParseFormatError(s.to_owned())),
        }
    }
}

/// Turns a log record into its final textual representation.
pub trait Render: Send + Sync {
    /// Render one record as a single line (without trailing newline).
    fn render(&self, record: &Record<'_>) -> String;
}

/// Plain text renderer.
///
/// Produces `[<timestamp>] [<LEVEL>] <message>`, and appends
/// ` - k1=v1 k2=v2` when fields are present. Fields are sorted by key and
/// separated by single spaces with no trailing space.
pub struct TextRenderer;

impl Render for TextRenderer {
    fn render(&self, record: &Record<'_>) -> String {
        let mut out = format!(
            "[{}] [{}] {}",
            record.timestamp, record.level, record.message
        );
        if !record.fields.is_empty() {
            out.push_str(" -");
            for (key, value) in record.fields {
                out.push(' ');
                let _ = write!(out, "{key}={}", display_value(value));
            }
        }
        out
    }
}

/// JSON renderer.
///
/// Produces a flat object carrying `level`, `message`, `timestamp`, and
/// every merged field at the top level. Field keys named like a reserved
/// key override it; that pass-through is deliberate and unguarded.
pub struct JsonRenderer;

impl Render for JsonRenderer {
    fn render(&self, record: &Record<'_>) -> String {
        let mut object = Map::with_capacity(record.fields.len() + 3);
        object.insert(
            "level".to_owned(),
            Value::String(record.level.as_str().to_owned()),
        );
        object.insert("message".to_owned(), Value::String(record.message.to_owned()));
        object.insert(
            "timestamp".to_owned(),
            Value::String(record.timestamp.clone()),
        );
        for (key, value) in record.fields {
            object.insert(key.clone(), value.clone());
        }
        match serde_json::to_string(&object) {
            Ok(line) => line,
            // A Map<String, Value> always serializes; keep the record
            // anyway if that ever stops holding.
            Err(_) => TextRenderer.render(record),
        }
    }
}

/// Textual form of a field value for the text renderer.
///
/// Strings render bare (no surrounding quotes); everything else renders
/// as its JSON representation.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
