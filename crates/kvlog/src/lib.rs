//! Leveled, structured logging with a process-wide logger.
//!
//! Configure once in `main` with [`set_logger`], then call [`debug`],
//! [`info`], [`warn`], [`error`] or [`fatal`] anywhere. [`with`] derives a
//! logger that prepends fixed fields to every record. Components that take
//! their logger as a dependency can build a [`Logger`] directly instead.

pub mod bridge;
pub mod config;
pub mod encoding;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod timestamp;
pub mod value;
pub mod writer;

pub use config::Config;
pub use encoding::Format;
pub use error::{ConfigError, Fatal, EXIT_CODE};
pub use global::{
    debug, error, fatal, info, install, log, logger, set_logger, try_set_logger, warn, with,
};
pub use level::{Level, LevelFilter};
pub use logger::{Caller, Logger};
pub use value::{Field, Value};
pub use writer::MemoryWriter;
