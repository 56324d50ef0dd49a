//! Core logger types and traits

pub mod buffer_pool;
pub mod config;
pub mod delivery;
pub mod encoder;
pub mod error;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod timestamp;

pub use buffer_pool::{BufferPool, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_IDLE};
pub use config::LoggerConfig;
pub use delivery::DeliveryChannel;
pub use error::{LoggerError, Result};
pub use log_context::{Field, FieldValue, TracingContext};
pub use log_level::LogLevel;
pub use logger::{ContextLogger, ExitHandler, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::{OutputFormat, Record};
pub use sink::Sink;
pub use timestamp::{Clock, FixedClock, SystemClock, TimeZoneMode};
