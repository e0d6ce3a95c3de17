//! Timestamp layouts for the `ts` field.
//!
//! Layouts are strftime patterns. A layout without any `%` is read as a
//! reference-time layout (`2006-01-02T15:04:05.000000Z` style) and
//! translated to strftime first. Either way the result must contain at least
//! one time specifier, otherwise every record would carry the same text.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::ConfigError;

/// Default layout: UTC with microseconds and a literal `Z`,
/// e.g. `2024-03-01T12:30:05.123456Z`.
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Reference-time tokens and their strftime equivalents, longest first where
/// one token is a prefix of another. Times are always UTC, so the zone
/// designator `Z07:00` renders as a literal `Z`.
const REFERENCE_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    ("Z07:00", "Z"),
    ("-07:00", "%:z"),
    ("-0700", "%z"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("PM", "%p"),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
];

/// A validated strftime layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampLayout(String);

impl TimestampLayout {
    /// Validate `layout`.
    ///
    /// Unknown or malformed specifiers are an error, and so is a layout that
    /// renders no part of the time.
    pub fn parse(layout: &str) -> Result<Self, ConfigError> {
        let strftime = if layout.contains('%') {
            layout.to_string()
        } else {
            translate_reference(layout)
        };

        let mut has_time = false;
        for item in StrftimeItems::new(&strftime) {
            match item {
                Item::Error => return Err(ConfigError::TimestampLayout(layout.to_string())),
                Item::Literal(_) | Item::OwnedLiteral(_) | Item::Space(_) | Item::OwnedSpace(_) => {}
                _ => has_time = true,
            }
        }
        if !has_time {
            return Err(ConfigError::TimestampLayout(layout.to_string()));
        }

        Ok(Self(strftime))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format the current wall-clock time.
    pub fn now(&self) -> String {
        self.format(Utc::now())
    }

    pub fn format(&self, at: DateTime<Utc>) -> String {
        let mut out = String::new();
        // Validated at parse time; a formatting error leaves what was written so far.
        let _ = write!(out, "{}", at.format(&self.0));
        out
    }
}

fn translate_reference(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, spec) in REFERENCE_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

impl Default for TimestampLayout {
    fn default() -> Self {
        Self(DEFAULT_LAYOUT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    #[test]
    fn test_default_layout() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
            + chrono::Duration::microseconds(123_456);
        assert_eq!(
            TimestampLayout::default().format(at),
            "2024-03-01T12:30:05.123456Z"
        );
    }

    #[test]
    fn test_now_parses_back() {
        let layout = TimestampLayout::default();
        let ts = layout.now();
        assert!(NaiveDateTime::parse_from_str(&ts, layout.as_str()).is_ok());
    }

    #[test]
    fn test_custom_layout() {
        let layout = TimestampLayout::parse("%H:%M").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 7, 5, 0).unwrap();
        assert_eq!(layout.format(at), "07:05");
    }

    #[test]
    fn test_invalid_layout_rejected() {
        assert_eq!(
            TimestampLayout::parse("%Q"),
            Err(ConfigError::TimestampLayout("%Q".to_string()))
        );
    }

    #[test]
    fn test_reference_layout_translated() {
        let layout = TimestampLayout::parse("2006-01-02T15:04:05.000000Z").unwrap();
        assert_eq!(layout.as_str(), DEFAULT_LAYOUT);

        let layout = TimestampLayout::parse("Mon Jan _2 15:04:05 2006").unwrap();
        assert_eq!(layout.as_str(), "%a %b %e %H:%M:%S %Y");

        let layout = TimestampLayout::parse("2006-01-02T15:04:05Z07:00").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 7, 5, 9).unwrap();
        assert_eq!(layout.format(at), "2024-03-01T07:05:09Z");
    }

    #[test]
    fn test_layout_without_time_rejected() {
        for layout in ["timestamp", "T-Z", "%%"] {
            assert_eq!(
                TimestampLayout::parse(layout),
                Err(ConfigError::TimestampLayout(layout.to_string())),
                "layout {:?}",
                layout
            );
        }
    }
}
