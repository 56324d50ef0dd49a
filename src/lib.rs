//! # Rust Fast Logger
//!
//! A low-allocation structured logger. Each record is rendered as a single
//! line of text or JSON into a pooled scratch buffer and then either written
//! straight to a sink or accumulated and written in batches.
//!
//! ## Features
//!
//! - **Cheap when disabled**: a call below the level threshold does nothing
//! - **Pooled buffers**: encoding reuses scratch buffers across calls
//! - **Batched output**: optional accumulation buffer with explicit flush
//! - **Thread Safe**: one logger can be shared by any number of threads
//!
//! ```
//! use rust_fast_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Info)
//!     .format(OutputFormat::Json)
//!     .sink(sink.clone())
//!     .build();
//!
//! logger.info("started", &[Field::new("userID", 12345)]);
//! assert!(sink.contents_string().contains(r#""message":"started","userID":12345}"#));
//! ```

#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        BufferPool, Clock, ContextLogger, Field, FieldValue, FixedClock, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, Sink,
        SystemClock, TimeZoneMode, TracingContext,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    BufferPool, Clock, ContextLogger, ExitHandler, Field, FieldValue, FixedClock, LogLevel,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Record, Result,
    Sink, SystemClock, TimeZoneMode, TracingContext,
};
pub use sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink, WriterSink};
