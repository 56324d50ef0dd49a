//! Logger configuration
//!
//! A [`LoggerConfig`] is plain data fixed at construction time. It can be
//! built directly, deserialized, or read from the environment:
//!
//! | Variable          | Meaning                        | Fallback |
//! |-------------------|--------------------------------|----------|
//! | `LOG_LEVEL`       | minimum level, any case        | `DEBUG`  |
//! | `LOG_FORMAT`      | `text` or `json`, any case     | `text`   |
//! | `LOG_BUFFER_SIZE` | accumulation capacity in bytes | `0`      |
//! | `LOG_USE_UTC`     | `true` / `1` for UTC JSON time | local    |
//!
//! Unparsable values never fail; they fall back as listed.

use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::timestamp::TimeZoneMode;
use serde::{Deserialize, Serialize};

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_LOG_BUFFER_SIZE: &str = "LOG_BUFFER_SIZE";
pub const ENV_LOG_USE_UTC: &str = "LOG_USE_UTC";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Records below this level are discarded without any work
    pub level: LogLevel,

    /// Record layout
    pub format: OutputFormat,

    /// Accumulation buffer capacity in bytes; 0 writes every record through
    pub buffer_size: usize,

    /// Zone for JSON timestamps (text timestamps are always UTC)
    pub time_zone: TimeZoneMode,
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fast_logger::{LoggerConfig, LogLevel, OutputFormat};
    ///
    /// let config = LoggerConfig::from_lookup(|key| match key {
    ///     "LOG_LEVEL" => Some("warn".to_string()),
    ///     "LOG_FORMAT" => Some("JSON".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.level, LogLevel::Warn);
    /// assert_eq!(config.format, OutputFormat::Json);
    /// assert_eq!(config.buffer_size, 0);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).unwrap_or_default();

        Self {
            level: LogLevel::from_env_value(&value(ENV_LOG_LEVEL)),
            format: OutputFormat::from_env_value(&value(ENV_LOG_FORMAT)),
            buffer_size: parse_buffer_size(&value(ENV_LOG_BUFFER_SIZE)),
            time_zone: TimeZoneMode::from_env_value(&value(ENV_LOG_USE_UTC)),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZoneMode) -> Self {
        self.time_zone = time_zone;
        self
    }
}

// Negative or non-numeric sizes disable buffering
fn parse_buffer_size(value: &str) -> usize {
    value.trim().parse().unwrap_or(0)
}
