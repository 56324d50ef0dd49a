//! Logging macros for structured fields.
//!
//! The field list is built as an array on the stack, so a call through a
//! macro costs no more than calling the logger method directly.
//!
//! # Examples
//!
//! ```
//! use rust_fast_logger::prelude::*;
//! use rust_fast_logger::info;
//!
//! let logger = Logger::builder().sink(MemorySink::new()).build();
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With fields
//! let port = 8080;
//! info!(logger, "Server listening", "port" => port, "tls" => false);
//! ```

/// Build an array of fields.
///
/// # Examples
///
/// ```
/// use rust_fast_logger::fields;
///
/// let fields = fields!("user" => "alice", "attempt" => 3);
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].key, "user");
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {
        [$($crate::Field::new($key, $value)),*]
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_fast_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use rust_fast_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Request failed", "status" => 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.log($level, $msg, &[$($crate::Field::new($key, $value)),*])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_fast_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use rust_fast_logger::debug;
/// debug!(logger, "Cache miss", "key" => "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.debug($msg, &[$($crate::Field::new($key, $value)),*])
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_fast_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use rust_fast_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing batch", "items" => 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.info($msg, &[$($crate::Field::new($key, $value)),*])
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.warn($msg, &[$($crate::Field::new($key, $value)),*])
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_fast_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use rust_fast_logger::error;
/// error!(logger, "Failed to connect to database", "retries" => 3, "fatal" => false);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.error($msg, &[$($crate::Field::new($key, $value)),*])
    };
}

/// Log a fatal-level message, then run the logger's exit handler.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.fatal($msg, &[$($crate::Field::new($key, $value)),*])
    };
}

/// Log a panic-level message, then panic.
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.panic($msg, &[$($crate::Field::new($key, $value)),*])
    };
}
