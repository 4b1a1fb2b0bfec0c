//! Logger configuration.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use quill_core::{Format, Level};

/// Configuration for a [`Logger`](crate::Logger).
///
/// All fields have working defaults: Info level, text format, console
/// enabled, no file sink. The struct deserializes from TOML, so a config
/// file needs to name only the fields it changes:
///
/// ```toml
/// level = "debug"
/// format = "json"
/// file = "/var/log/app.log"
/// ```
///
/// # Environment variables
///
/// [`Config::with_env_overrides`] layers these on top of the loaded
/// values:
///
/// - `QUILL_LEVEL` - minimum level (`debug`..`fatal`)
/// - `QUILL_FORMAT` - `text` or `json`
/// - `QUILL_LOG_FILE` - append-mode log file path
/// - `QUILL_CONSOLE` - `0`/`false`/`no`/`off` disable the console sink
///
/// Unparseable values are ignored rather than reported; configuration
/// handling is fail-open like the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum severity that will be emitted.
    pub level: Level,
    /// Output representation.
    pub format: Format,
    /// Whether rendered records go to stdout.
    pub console: bool,
    /// Optional append-mode log file.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Text,
            console: true,
            file: None,
        }
    }
}

impl Config {
    /// Default configuration: Info, text, console only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with `QUILL_*` environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `QUILL_*` environment overrides on top of `self`.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = get("QUILL_LEVEL") {
            if let Ok(level) = value.parse() {
                self.level = level;
            }
        }
        if let Some(value) = get("QUILL_FORMAT") {
            if let Ok(format) = value.parse() {
                self.format = format;
            }
        }
        if let Some(value) = get("QUILL_LOG_FILE") {
            if !value.is_empty() {
                self.file = Some(PathBuf::from(value));
            }
        }
        if let Some(value) = get("QUILL_CONSOLE") {
            self.console = !matches!(
                value.to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn apply(config: Config, env: &HashMap<String, String>) -> Config {
        config.apply_overrides(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_match_the_contract() {
        let config = Config::default();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.format, Format::Text);
        assert!(config.console);
        assert!(config.file.is_none());
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let env = overrides(&[
            ("QUILL_LEVEL", "debug"),
            ("QUILL_FORMAT", "json"),
            ("QUILL_LOG_FILE", "/tmp/app.log"),
            ("QUILL_CONSOLE", "off"),
        ]);

        let config = apply(Config::default(), &env);
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/app.log")));
        assert!(!config.console);
    }

    #[test]
    fn unparseable_overrides_are_ignored() {
        let env = overrides(&[
            ("QUILL_LEVEL", "loud"),
            ("QUILL_FORMAT", "yaml"),
            ("QUILL_LOG_FILE", ""),
        ]);

        let config = apply(Config::default(), &env);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn console_override_accepts_truthy_values() {
        let env = overrides(&[("QUILL_CONSOLE", "1")]);
        let mut config = Config::default();
        config.console = false;
        assert!(apply(config, &env).console);
    }

    #[test]
    fn deserializes_with_per_field_defaults() {
        let config: Config = serde_json::from_str(r#"{"level":"warn"}"#).unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.format, Format::Text);
        assert!(config.console);
    }
}
