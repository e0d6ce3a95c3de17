//! Error types for logger configuration and fatal records.

use std::process;

/// Exit code used for configuration failures and fatal records.
pub const EXIT_CODE: i32 = 1;

/// Error type for logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unrecognized log level {0:?}")]
    Level(String),
    #[error("unrecognized log format {0:?}")]
    Format(String),
    #[error("invalid timestamp layout {0:?}")]
    TimestampLayout(String),
}

impl ConfigError {
    /// Print the diagnostic to standard error and terminate the process.
    pub fn exit(&self) -> ! {
        eprintln!("{}", self);
        process::exit(EXIT_CODE)
    }
}

/// Termination signal returned by [`Logger::fatal`](crate::Logger::fatal).
///
/// The record has already been handed to the sink when this value exists,
/// whether or not the level filter let it through. Callers either propagate
/// it as an error or call [`Fatal::exit`].
#[must_use = "a fatal record should terminate the program; call `exit()` or propagate it"]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fatal: {message}")]
pub struct Fatal {
    message: String,
}

impl Fatal {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message of the fatal record.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code this signal stands for.
    pub fn code(&self) -> i32 {
        EXIT_CODE
    }

    /// Terminate the process with [`EXIT_CODE`].
    pub fn exit(self) -> ! {
        process::exit(EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_offending_value() {
        let err = ConfigError::Level("verbose".to_string());
        assert_eq!(err.to_string(), r#"unrecognized log level "verbose""#);

        let err = ConfigError::Format("xml".to_string());
        assert_eq!(err.to_string(), r#"unrecognized log format "xml""#);
    }

    #[test]
    fn test_fatal_carries_message_and_code() {
        let fatal = Fatal::new("disk gone");
        assert_eq!(fatal.message(), "disk gone");
        assert_eq!(fatal.code(), 1);
        assert_eq!(fatal.to_string(), "fatal: disk gone");
    }
}
