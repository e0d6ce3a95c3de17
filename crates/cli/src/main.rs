//! Command-line front end for the kvlog process-wide logger.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use kvlog::{Config, Field, Level, Value};
use tracing::{debug, error, info, warn};

#[derive(Parser)]
#[command(name = "kvlog")]
#[command(about = "Emit structured log records to standard error")]
struct Cli {
    /// Minimum level: all, debug, info, warn, error or none
    #[arg(long, global = true)]
    level: Option<String>,

    /// Output format: text or json
    #[arg(long, global = true)]
    format: Option<String>,

    /// strftime layout of the ts field
    #[arg(long, global = true)]
    timestamp_layout: Option<String>,

    /// Omit the caller field
    #[arg(long, global = true)]
    no_caller: bool,

    /// JSON file with logger settings; LOG_* variables and flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record
    Emit {
        /// Record severity
        #[arg(long, value_enum, default_value = "info")]
        severity: Severity,

        /// Human-readable message
        message: String,

        /// Record field as key=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<Field>,

        /// Context field as key=value, prepended through a derived logger (repeatable)
        #[arg(long = "context", value_parser = parse_field)]
        context: Vec<Field>,
    },
    /// Emit an error record and exit with code 1
    Fatal {
        /// Human-readable message
        message: String,

        /// Record field as key=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<Field>,
    },
    /// Emit one record through `tracing` and the bridge layer
    Trace {
        /// Record severity
        #[arg(long, value_enum, default_value = "info")]
        severity: Severity,

        /// Human-readable message
        message: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Level::Debug,
            Severity::Info => Level::Info,
            Severity::Warn => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    kvlog::set_logger(config);

    match cli.command {
        Commands::Emit {
            severity,
            message,
            fields,
            context,
        } => {
            if context.is_empty() {
                kvlog::log(severity.into(), &message, &fields);
            } else {
                kvlog::with(&context).log(severity.into(), &message, &fields);
            }
        }
        Commands::Fatal { message, fields } => kvlog::fatal(&message, &fields),
        Commands::Trace { severity, message } => {
            kvlog::bridge::init_tracing(None)?;
            match severity {
                Severity::Debug => debug!("{}", message),
                Severity::Info => info!("{}", message),
                Severity::Warn => warn!("{}", message),
                Severity::Error => error!("{}", message),
            }
        }
    }

    Ok(())
}

/// Settings file, then `LOG_*` variables, then flags; later sources win.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => Config::default(),
    };

    overlay(&mut config, Config::from_env());
    overlay(
        &mut config,
        Config {
            level: cli.level.clone().unwrap_or_default(),
            format: cli.format.clone().unwrap_or_default(),
            timestamp_layout: cli.timestamp_layout.clone().unwrap_or_default(),
            no_caller: cli.no_caller,
        },
    );

    Ok(config)
}

fn overlay(base: &mut Config, over: Config) {
    if !over.level.is_empty() {
        base.level = over.level;
    }
    if !over.format.is_empty() {
        base.format = over.format;
    }
    if !over.timestamp_layout.is_empty() {
        base.timestamp_layout = over.timestamp_layout;
    }
    base.no_caller |= over.no_caller;
}

/// Parse `key=value`, typing the value as integer, float, bool or string.
fn parse_field(raw: &str) -> Result<Field, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in {:?}", raw));
    }

    let value = if let Ok(i) = value.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = value.parse::<f64>() {
        Value::Float(f)
    } else if let Ok(b) = value.parse::<bool>() {
        Value::Bool(b)
    } else {
        Value::from(value)
    };

    Ok(Field::new(key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_types_values() {
        assert_eq!(parse_field("n=3").unwrap(), Field::new("n", 3));
        assert_eq!(parse_field("r=0.5").unwrap(), Field::new("r", 0.5));
        assert_eq!(parse_field("ok=true").unwrap(), Field::new("ok", true));
        assert_eq!(parse_field("who=a=b").unwrap(), Field::new("who", "a=b"));
        assert_eq!(parse_field("empty=").unwrap(), Field::new("empty", ""));
    }

    #[test]
    fn test_parse_field_rejects_malformed() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let mut base = Config::default().with_level("debug").with_format("json");
        overlay(&mut base, Config::default().with_format("text"));
        assert_eq!(base.level, "debug");
        assert_eq!(base.format, "text");
        assert!(!base.no_caller);

        overlay(&mut base, Config::default().without_caller());
        assert!(base.no_caller);
    }
}
