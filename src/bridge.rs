//! Bridge from the `log` facade
//!
//! Installing a [`Logger`] as the global `log` backend routes `log::info!`
//! and friends through the same encode-and-deliver path. `log`'s `Trace`
//! level has no counterpart and is treated as `Debug`. The record's target
//! is attached as a `target` field.

use crate::core::{Field, LogLevel, Logger, LoggerError, Result};
use log::LevelFilter;

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

/// Most verbose `log` level that can pass a logger set to `level`
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Debug => LevelFilter::Trace,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Fatal | LogLevel::Panic => LevelFilter::Off,
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }

        let fields = [Field::new("target", record.target())];
        match record.args().as_str() {
            Some(message) => Logger::log(self, level, message, &fields),
            None => {
                let message = record.args().to_string();
                Logger::log(self, level, &message, &fields);
            }
        }
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

/// Install `logger` as the process-wide `log` backend
///
/// Fails if another backend has already been installed.
pub fn init(logger: Logger) -> Result<()> {
    let filter = level_filter(logger.config().level);
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| LoggerError::config("log bridge", e.to_string()))?;
    log::set_max_level(filter);
    Ok(())
}
