//! Record encoders: logfmt text and JSON lines.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::value::{Field, Value};

/// Output format of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `key=value` pairs on one line (logfmt).
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
        }
    }

    /// Append one encoded record, including the trailing newline, to `buf`.
    pub fn encode(&self, fields: &[Field], buf: &mut Vec<u8>) {
        match self {
            Format::Text => encode_logfmt(fields, buf),
            Format::Json => encode_json(fields, buf),
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(ConfigError::Format(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn needs_quotes(c: char) -> bool {
    c <= ' ' || c == '=' || c == '"' || c == char::REPLACEMENT_CHARACTER || c.is_control()
}

fn encode_logfmt(fields: &[Field], buf: &mut Vec<u8>) {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        push_key(&mut line, &field.key);
        line.push('=');
        push_value(&mut line, &field.value);
    }
    line.push('\n');
    buf.extend_from_slice(line.as_bytes());
}

fn push_key(line: &mut String, key: &str) {
    if key.is_empty() {
        line.push('_');
        return;
    }
    line.extend(key.chars().map(|c| if needs_quotes(c) { '_' } else { c }));
}

fn push_value(line: &mut String, value: &Value) {
    let rendered = match value {
        Value::Null => {
            line.push_str("null");
            return;
        }
        Value::Str(s) | Value::Error(s) if s == "null" => {
            line.push_str("\"null\"");
            return;
        }
        other => other.to_string(),
    };

    if !rendered.chars().any(needs_quotes) {
        line.push_str(&rendered);
        return;
    }

    line.push('"');
    for c in rendered.chars() {
        match c {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if c.is_control() => line.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => line.push(c),
        }
    }
    line.push('"');
}

fn encode_json(fields: &[Field], buf: &mut Vec<u8>) {
    let object: serde_json::Map<String, serde_json::Value> = fields
        .iter()
        .map(|field| (field.key.to_string(), field.value.to_json()))
        .collect();
    // A map of strings to plain JSON values cannot fail to serialize.
    if serde_json::to_writer(&mut *buf, &object).is_ok() {
        buf.push(b'\n');
    }
}
