//! The leveled logger.
//!
//! A [`Logger`] is built once from a [`Config`] and is cheap to clone. Every
//! record it emits has the shape
//!
//! ```text
//! ts=<timestamp> caller=<file:line> <context fields...> level=<level> msg=<message> <fields...>
//! ```
//!
//! where `caller` is omitted when `no_caller` is set and the context fields
//! come from [`Logger::with`], outermost derivation first.
//!
//! Context fields sit between `caller` and `level`, so in a derived logger
//! `level` is not the first field after the stamps. Readers that look for
//! `level` at a fixed position must key on the name instead.

use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

use crate::config::Config;
use crate::encoding::Format;
use crate::error::{ConfigError, Fatal};
use crate::level::{Level, LevelFilter};
use crate::timestamp::TimestampLayout;
use crate::value::Field;
use crate::writer::SyncWriter;

/// Source location of a logging call, rendered as `<file basename>:<line>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file();
        let base = file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(file);
        write!(f, "{}:{}", base, self.line())
    }
}

struct Sink {
    writer: SyncWriter,
    format: Format,
    filter: LevelFilter,
    timestamp: TimestampLayout,
    caller: bool,
}

/// Leveled, structured logger.
///
/// Clones and loggers derived with [`Logger::with`] share the sink they were
/// created from.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<Sink>,
    context: Arc<[Field]>,
}

impl Logger {
    /// Build a logger writing to standard error.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::build(config, SyncWriter::stderr())
    }

    /// Build a logger writing to `writer`.
    pub fn with_writer<W: Write + Send + 'static>(
        config: Config,
        writer: W,
    ) -> Result<Self, ConfigError> {
        Self::build(config, SyncWriter::new(writer))
    }

    fn build(config: Config, writer: SyncWriter) -> Result<Self, ConfigError> {
        let config = config.resolve();
        let filter: LevelFilter = config.level.parse()?;
        let format: Format = config.format.parse()?;
        let timestamp = TimestampLayout::parse(&config.timestamp_layout)?;

        Ok(Self {
            sink: Arc::new(Sink {
                writer,
                format,
                filter,
                timestamp,
                caller: !config.no_caller,
            }),
            context: Arc::from(Vec::new()),
        })
    }

    /// Logger with every default setting, writing to standard error.
    pub(crate) fn fallback() -> Self {
        Self {
            sink: Arc::new(Sink {
                writer: SyncWriter::stderr(),
                format: Format::default(),
                filter: LevelFilter::default(),
                timestamp: TimestampLayout::default(),
                caller: true,
            }),
            context: Arc::from(Vec::new()),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.sink.filter
    }

    pub fn format(&self) -> Format {
        self.sink.format
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.sink.filter.allows(level)
    }

    /// Derive a logger that prepends `fields` to every record.
    ///
    /// The derived logger keeps this logger's sink; re-initializing the
    /// global logger afterwards does not affect it.
    pub fn with(&self, fields: &[Field]) -> Logger {
        let context: Vec<Field> = self.context.iter().chain(fields).cloned().collect();
        Logger {
            sink: self.sink.clone(),
            context: Arc::from(context),
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.emit(level, Some(Location::caller().into()), msg, fields);
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Debug, Some(Location::caller().into()), msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Info, Some(Location::caller().into()), msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Warn, Some(Location::caller().into()), msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Error, Some(Location::caller().into()), msg, fields);
    }

    /// Emit an `error` record and return the termination signal.
    ///
    /// The signal is returned even when the level filter drops the record,
    /// so a logger configured with `none` still stops the program.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> Fatal {
        self.emit(Level::Error, Some(Location::caller().into()), msg, fields);
        Fatal::new(msg)
    }

    /// Filter, stamp, encode and write one record. Write errors are dropped.
    pub(crate) fn emit(&self, level: Level, caller: Option<Caller>, msg: &str, fields: &[Field]) {
        if !self.sink.filter.allows(level) {
            return;
        }

        let mut record = Vec::with_capacity(4 + self.context.len() + fields.len());
        record.push(Field::new("ts", self.sink.timestamp.now()));
        if let Some(caller) = caller.filter(|_| self.sink.caller) {
            record.push(Field::new("caller", caller.to_string()));
        }
        record.extend(self.context.iter().cloned());
        record.push(Field::new("level", level.as_str()));
        record.push(Field::new("msg", msg));
        record.extend(fields.iter().cloned());

        let mut buf = Vec::with_capacity(256);
        self.sink.format.encode(&record, &mut buf);
        let _ = self.sink.writer.write_record(&buf);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("filter", &self.sink.filter)
            .field("format", &self.sink.format)
            .field("timestamp", &self.sink.timestamp)
            .field("caller", &self.sink.caller)
            .field("context", &self.context)
            .finish()
    }
}
