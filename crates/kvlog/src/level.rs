//! Record severities and the configured level filter.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Severity of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum severity a logger lets through.
///
/// Each setting allows its own severity and every more severe one:
/// `All ⊇ Debug ⊇ Info ⊇ Warn ⊇ Error ⊇ None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelFilter {
    All,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    None,
}

impl LevelFilter {
    /// Whether a record at `level` passes this filter.
    pub fn allows(&self, level: Level) -> bool {
        match self {
            LevelFilter::All | LevelFilter::Debug => true,
            LevelFilter::Info => level >= Level::Info,
            LevelFilter::Warn => level >= Level::Warn,
            LevelFilter::Error => level >= Level::Error,
            LevelFilter::None => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelFilter::All => "all",
            LevelFilter::Debug => "debug",
            LevelFilter::Info => "info",
            LevelFilter::Warn => "warn",
            LevelFilter::Error => "error",
            LevelFilter::None => "none",
        }
    }
}

impl FromStr for LevelFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LevelFilter::All),
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "none" => Ok(LevelFilter::None),
            other => Err(ConfigError::Level(other.to_string())),
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

    fn allowed(filter: LevelFilter) -> Vec<Level> {
        LEVELS.into_iter().filter(|l| filter.allows(*l)).collect()
    }

    #[test]
    fn test_filters_nest() {
        assert_eq!(allowed(LevelFilter::All), LEVELS.to_vec());
        assert_eq!(allowed(LevelFilter::Debug), LEVELS.to_vec());
        assert_eq!(
            allowed(LevelFilter::Info),
            vec![Level::Info, Level::Warn, Level::Error]
        );
        assert_eq!(allowed(LevelFilter::Warn), vec![Level::Warn, Level::Error]);
        assert_eq!(allowed(LevelFilter::Error), vec![Level::Error]);
        assert!(allowed(LevelFilter::None).is_empty());
    }

    #[test]
    fn test_parse_filter() {
        for name in ["all", "debug", "info", "warn", "error", "none"] {
            let filter: LevelFilter = name.parse().unwrap();
            assert_eq!(filter.as_str(), name);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert_eq!(
            "verbose".parse::<LevelFilter>(),
            Err(ConfigError::Level("verbose".to_string()))
        );
        assert!("INFO".parse::<LevelFilter>().is_err());
    }
}
