//! Process-wide logger and package-level logging functions.
//!
//! Configure once at startup with [`set_logger`], then log from anywhere:
//!
//! ```no_run
//! use kvlog::{kv, Config};
//!
//! kvlog::set_logger(Config::default().with_level("debug"));
//! kvlog::info("listening", &kv!["port" => 8080]);
//! ```
//!
//! Initialization must happen before other threads start logging. Each call
//! to [`set_logger`] or [`install`] replaces the logger wholesale; loggers
//! already derived with [`with`] keep the sink they were derived from.

use std::panic::Location;
use std::process;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::Config;
use crate::error::{ConfigError, EXIT_CODE};
use crate::level::Level;
use crate::logger::{Caller, Logger};
use crate::value::Field;

static LOGGER: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::fallback()));

/// Configure the process-wide logger.
///
/// `None` means an all-defaults configuration. An unrecognized level or
/// format, or an invalid timestamp layout, prints a diagnostic to standard
/// error and exits the process with code 1.
pub fn set_logger(config: impl Into<Option<Config>>) {
    if let Err(err) = try_set_logger(config) {
        err.exit();
    }
}

/// Like [`set_logger`], but returns configuration errors instead of exiting.
pub fn try_set_logger(config: impl Into<Option<Config>>) -> Result<(), ConfigError> {
    let logger = Logger::new(config.into().unwrap_or_default())?;
    install(logger);
    Ok(())
}

/// Replace the process-wide logger with a prebuilt one.
pub fn install(logger: Logger) {
    tracing::debug!(
        level = %logger.level_filter(),
        format = %logger.format(),
        "installing process-wide logger"
    );
    LOGGER.store(Arc::new(logger));
}

/// The current process-wide logger.
pub fn logger() -> Logger {
    let current = LOGGER.load();
    Logger::clone(&current)
}

/// Derive a logger from the current process-wide logger with `fields` prepended.
pub fn with(fields: &[Field]) -> Logger {
    LOGGER.load().with(fields)
}

pub(crate) fn emit(level: Level, caller: Option<Caller>, msg: &str, fields: &[Field]) {
    LOGGER.load().emit(level, caller, msg, fields);
}

#[track_caller]
pub fn log(level: Level, msg: &str, fields: &[Field]) {
    LOGGER.load().emit(level, Some(Location::caller().into()), msg, fields);
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    LOGGER.load().emit(Level::Debug, Some(Location::caller().into()), msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    LOGGER.load().emit(Level::Info, Some(Location::caller().into()), msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    LOGGER.load().emit(Level::Warn, Some(Location::caller().into()), msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    LOGGER.load().emit(Level::Error, Some(Location::caller().into()), msg, fields);
}

/// Emit an `error` record, then exit the process with code 1.
///
/// The process exits even if the configured level drops the record.
/// Use [`Logger::fatal`] to get a signal back instead of exiting.
#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    LOGGER.load().emit(Level::Error, Some(Location::caller().into()), msg, fields);
    process::exit(EXIT_CODE)
}
