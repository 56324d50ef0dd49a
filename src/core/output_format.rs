//! Record layouts
//!
//! - Text: `2025-01-08T10:30:45.123Z INFO Request processed user=alice`
//! - Json: `{"timestamp":"...","level":"INFO","message":"Request processed","user":"alice"}`
//!
//! Neither layout appends a trailing newline; line termination belongs to
//! the delivery channel.

use super::encoder::{append_json_quoted, append_json_string};
use super::error::LoggerError;
use super::log_context::Field;
use super::log_level::LogLevel;
use super::timestamp::{append_json_timestamp, append_text_timestamp, TimeZoneMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    #[default]
    Text,

    /// Single-line JSON object per record
    Json,
}

impl OutputFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Lenient parse used for environment values; anything unrecognized is
    /// treated as text.
    pub fn from_env_value(value: &str) -> Self {
        value.parse().unwrap_or(OutputFormat::Text)
    }

    /// Append the full encoding of `record` to `buf`
    pub fn encode(&self, buf: &mut Vec<u8>, record: &Record<'_>, zone: TimeZoneMode) {
        match self {
            OutputFormat::Text => encode_text(buf, record),
            OutputFormat::Json => encode_json(buf, record, zone),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(LoggerError::invalid_format(s)),
        }
    }
}

/// One log event, borrowed from the call site for the duration of encoding
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: &'a str,
    pub fields: &'a [Field<'a>],
}

impl<'a> Record<'a> {
    pub fn new(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: &'a str,
        fields: &'a [Field<'a>],
    ) -> Self {
        Self {
            timestamp,
            level,
            message,
            fields,
        }
    }
}

fn encode_text(buf: &mut Vec<u8>, record: &Record<'_>) {
    append_text_timestamp(buf, &record.timestamp);
    buf.push(b' ');
    buf.extend_from_slice(record.level.to_str().as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(record.message.as_bytes());

    for field in record.fields {
        buf.push(b' ');
        buf.extend_from_slice(field.key.as_bytes());
        buf.push(b'=');
        field.value.encode(buf, OutputFormat::Text);
    }
}

fn encode_json(buf: &mut Vec<u8>, record: &Record<'_>, zone: TimeZoneMode) {
    buf.extend_from_slice(b"{\"timestamp\":\"");
    append_json_timestamp(buf, &record.timestamp, zone);
    buf.extend_from_slice(b"\",\"level\":\"");
    buf.extend_from_slice(record.level.to_str().as_bytes());
    buf.extend_from_slice(b"\",\"message\":\"");
    append_json_string(buf, record.message);
    buf.push(b'"');

    for field in record.fields {
        buf.push(b',');
        append_json_quoted(buf, &field.key);
        buf.push(b':');
        field.value.encode(buf, OutputFormat::Json);
    }

    buf.push(b'}');
}
