//! Logger configuration and defaults.

use std::env;

use serde::{Deserialize, Serialize};

use crate::timestamp::DEFAULT_LAYOUT;

pub const DEFAULT_LEVEL: &str = "info";
pub const DEFAULT_FORMAT: &str = "text";

/// Logger settings.
///
/// Every field is optional: an empty string means "use the default". Values
/// are only validated when a logger is built from the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `all`, `debug`, `info`, `warn`, `error` or `none`.
    pub level: String,
    /// `text` or `json`.
    pub format: String,
    /// strftime layout of the `ts` field, rendered in UTC.
    pub timestamp_layout: String,
    /// Omit the `caller` field.
    pub no_caller: bool,
}

impl Config {
    /// Read `LOG_LEVEL`, `LOG_FORMAT`, `LOG_TIMESTAMP_LAYOUT` and `LOG_NO_CALLER`.
    ///
    /// Unset variables leave the field empty so defaults still apply.
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_default(),
            format: env::var("LOG_FORMAT").unwrap_or_default(),
            timestamp_layout: env::var("LOG_TIMESTAMP_LAYOUT").unwrap_or_default(),
            no_caller: env::var("LOG_NO_CALLER")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        }
    }

    /// Fill every empty field with its default, in place.
    pub fn apply_defaults(&mut self) {
        if self.level.is_empty() {
            self.level = DEFAULT_LEVEL.to_string();
        }
        if self.format.is_empty() {
            self.format = DEFAULT_FORMAT.to_string();
        }
        if self.timestamp_layout.is_empty() {
            self.timestamp_layout = DEFAULT_LAYOUT.to_string();
        }
    }

    /// Consuming form of [`Config::apply_defaults`].
    pub fn resolve(mut self) -> Self {
        self.apply_defaults();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_timestamp_layout(mut self, layout: impl Into<String>) -> Self {
        self.timestamp_layout = layout.into();
        self
    }

    pub fn without_caller(mut self) -> Self {
        self.no_caller = true;
        self
    }
}
