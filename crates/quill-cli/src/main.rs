//! quill CLI - emit structured log records from the command line.
//!
//! Commands:
//! - `emit` - emit a single record through a configured logger
//! - `demo` - walk the levels with sample persistent and call-site fields
//!
//! Exit codes: 0 on success, 1 when a Fatal record was emitted, 2 on
//! usage errors.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;

use quill::{Config, FieldMap, Format, Level, Logger, Value, fields};

/// Emit leveled, structured log records from the command line.
#[derive(Parser)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Minimum severity that will be emitted.
    #[arg(long, global = true, value_name = "LEVEL")]
    min_level: Option<Level>,

    /// Output format (text or json).
    #[arg(long, global = true, value_name = "FORMAT")]
    format: Option<Format>,

    /// Append records to this file as well.
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Disable console output.
    #[arg(long, global = true)]
    no_console: bool,

    /// Load base configuration from a TOML file.
    ///
    /// Command-line flags and QUILL_* environment variables override the
    /// file's values.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit a single record.
    ///
    /// With `--level fatal` the process terminates with status 1 after
    /// the record reaches every sink.
    Emit {
        /// The log message.
        message: String,

        /// Severity of the record.
        #[arg(long, default_value = "info")]
        level: Level,

        /// Call-site field as KEY=VALUE; repeatable.
        ///
        /// Values parse as JSON where possible and fall back to plain
        /// strings. Entries without '=' are silently ignored.
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Walk the levels with sample persistent and call-site fields.
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{} {message}", style("error:").red().bold());
            return ExitCode::from(2);
        }
    };

    let logger = Logger::with_config(config);

    match cli.command {
        Commands::Emit {
            message,
            level,
            fields,
        } => {
            logger.log(level, &message, parse_fields(&fields));
        }
        Commands::Demo => run_demo(&logger),
    }

    ExitCode::SUCCESS
}

/// Resolve the effective configuration: file, then environment, then
/// command-line flags, most specific last.
fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
            toml::from_str(&raw)
                .map_err(|err| format!("invalid config {}: {err}", path.display()))?
        }
        None => Config::default(),
    };
    config = config.with_env_overrides();

    if let Some(level) = cli.min_level {
        config.level = level;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(path) = &cli.file {
        config.file = Some(path.clone());
    }
    if cli.no_console {
        config.console = false;
    }
    Ok(config)
}

/// Parse repeated `KEY=VALUE` arguments into a field map.
///
/// Lenient on purpose: entries without '=' or with an empty key are
/// dropped silently, and a later duplicate key wins.
fn parse_fields(raw: &[String]) -> FieldMap {
    let mut fields = FieldMap::new();
    for entry in raw {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| Value::String(value.to_owned()));
        fields.insert(key.to_owned(), value);
    }
    fields
}

fn run_demo(logger: &Logger) {
    logger.debug_with("connection opened", fields! { "peer" => "127.0.0.1:9000" });
    logger.info_with("application started", fields! { "version" => "1.0.0" });
    logger.warn_with("cache miss rate is high", fields! { "rate" => 0.42 });
    logger.error_with(
        "upstream request failed",
        fields! { "status" => 502, "retries" => 3 },
    );

    let worker = logger.with_fields(fields! { "component" => "worker", "worker_id" => 7 });
    worker.info("worker ready");
    worker.info_with(
        "job finished",
        fields! { "job_id" => "j-113", "duration_ms" => 184 },
    );
}
