//! Main logger implementation
//!
//! Each call runs the same short pipeline on the calling thread:
//! level check, scratch buffer from the pool, encode, deliver, buffer back
//! to the pool. A call below the configured level returns before touching
//! the pool, the clock or the sink.

use super::{
    buffer_pool::{BufferPool, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_IDLE},
    config::LoggerConfig,
    delivery::DeliveryChannel,
    error::Result,
    log_context::{Field, TracingContext},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::{OutputFormat, Record},
    sink::Sink,
    timestamp::{Clock, SystemClock, TimeZoneMode},
};
use crate::sinks::ConsoleSink;
use std::fmt;
use std::sync::Arc;

/// Called with exit status 1 after a fatal record has been delivered
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

fn default_exit_handler() -> ExitHandler {
    Arc::new(|code| {
        std::process::exit(code);
    })
}

/// Structured logger writing text or JSON records to a single sink
///
/// Safe to share between threads (`Arc<Logger>`). Records held in the
/// accumulation buffer are not written when the logger is dropped; call
/// [`Logger::flush`] before discarding a buffered logger.
pub struct Logger {
    config: LoggerConfig,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    channel: DeliveryChannel,
    pool: BufferPool,
    metrics: LoggerMetrics,
    on_exit: ExitHandler,
}

impl Logger {
    /// Create a logger writing to stdout
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a logger writing to `sink`
    #[must_use]
    pub fn with_sink<S: Sink + 'static>(config: LoggerConfig, sink: S) -> Self {
        Self::builder().config(config).sink(sink).build()
    }

    /// Create a stdout logger configured from `LOG_*` environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LoggerConfig::from_env())
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Whether a record at `level` would be written
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.config.level
    }

    /// Encode and deliver one record
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field<'_>]) {
        if !self.enabled(level) {
            return;
        }

        let mut buf = self.pool.acquire();
        let record = Record::new(self.clock.now(), level, message, fields);
        self.config
            .format
            .encode(&mut buf, &record, self.config.time_zone);
        self.channel
            .deliver(&mut buf, self.sink.as_ref(), &self.metrics);
        self.metrics.record_logged();
        self.pool.release(buf);
    }

    #[inline]
    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    pub fn warn(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    pub fn error(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Log at `Fatal`, flush, then invoke the exit handler with status 1.
    ///
    /// With the default handler the process exits and this never returns.
    pub fn fatal(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Fatal, message, fields);
        self.flush();
        (self.on_exit)(1);
    }

    /// Log at `Panic`, flush, then panic with `message`
    pub fn panic(&self, message: &str, fields: &[Field<'_>]) -> ! {
        self.log(LogLevel::Panic, message, fields);
        self.flush();
        panic!("{}", message);
    }

    /// Write any accumulated records to the sink.
    ///
    /// A no-op for unbuffered loggers and when nothing is pending. Sink
    /// failures are counted in [`LoggerMetrics::write_errors`] and
    /// otherwise ignored.
    pub fn flush(&self) {
        self.channel.flush(self.sink.as_ref(), &self.metrics);
    }

    /// Flush accumulated records, then ask the sink to flush its own
    /// buffers, reporting the sink's answer.
    pub fn sync(&self) -> Result<()> {
        self.flush();
        self.sink.flush()
    }

    /// Bytes waiting in the accumulation buffer
    pub fn pending_bytes(&self) -> usize {
        self.channel.pending_len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Logger whose records carry context fields resolved at every call
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fast_logger::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::builder().sink(sink.clone()).build();
    /// let request = logger.with_context(|| TracingContext::new("trace-1", "span-1"));
    ///
    /// request.info("handled", &[Field::new("status", 200)]);
    /// assert!(sink.contents_string().contains("traceID=trace-1 spanID=span-1 status=200"));
    /// ```
    pub fn with_context<F>(&self, resolve: F) -> ContextLogger<'_>
    where
        F: Fn() -> TracingContext + Send + Sync + 'static,
    {
        ContextLogger {
            logger: self,
            source: ContextSource::Dynamic(Box::new(resolve)),
        }
    }

    /// Logger whose records always carry the same context fields
    pub fn with_static_context(&self, context: TracingContext) -> ContextLogger<'_> {
        ContextLogger {
            logger: self,
            source: ContextSource::Static(context),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_fast_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Info)
    ///     .format(OutputFormat::Json)
    ///     .buffer_size(4096)
    ///     .sink(MemorySink::new())
    ///     .build();
    /// assert!(!logger.enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("sink", &self.sink.name())
            .field("pending_bytes", &self.pending_bytes())
            .finish()
    }
}

enum ContextSource {
    Static(TracingContext),
    Dynamic(Box<dyn Fn() -> TracingContext + Send + Sync>),
}

/// Logger view that prepends `traceID` / `spanID` fields to every record
///
/// Created by [`Logger::with_context`] or [`Logger::with_static_context`].
/// The context is only resolved for records that pass the level check.
pub struct ContextLogger<'l> {
    logger: &'l Logger,
    source: ContextSource,
}

impl ContextLogger<'_> {
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field<'_>]) {
        if !self.logger.enabled(level) {
            return;
        }
        match &self.source {
            ContextSource::Static(context) => {
                self.logger.log(level, message, &context.prepend_to(fields));
            }
            ContextSource::Dynamic(resolve) => {
                let context = resolve();
                self.logger.log(level, message, &context.prepend_to(fields));
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    pub fn warn(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    pub fn error(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Error, message, fields);
    }

    pub fn fatal(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Fatal, message, fields);
        self.logger.flush();
        (self.logger.on_exit)(1);
    }

    pub fn panic(&self, message: &str, fields: &[Field<'_>]) -> ! {
        self.log(LogLevel::Panic, message, fields);
        self.logger.flush();
        panic!("{}", message);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_fast_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .format(OutputFormat::Text)
///     .sink(ConsoleSink::stderr())
///     .on_exit(Arc::new(|code| eprintln!("would exit with {}", code)))
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Arc<dyn Sink>>,
    clock: Arc<dyn Clock>,
    pool_initial_capacity: usize,
    pool_max_idle: usize,
    on_exit: Option<ExitHandler>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            clock: Arc::new(SystemClock),
            pool_initial_capacity: DEFAULT_BUFFER_CAPACITY,
            pool_max_idle: DEFAULT_MAX_IDLE,
            on_exit: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Accumulate up to `bytes` before writing; 0 writes every record through
    #[must_use = "builder methods return a new value"]
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.config.buffer_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_zone(mut self, zone: TimeZoneMode) -> Self {
        self.config.time_zone = zone;
        self
    }

    /// Set the output sink (stdout if never called)
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Use a sink that is shared with other owners
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the timestamp source
    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Size the scratch buffer pool
    #[must_use = "builder methods return a new value"]
    pub fn pool(mut self, initial_capacity: usize, max_idle: usize) -> Self {
        self.pool_initial_capacity = initial_capacity;
        self.pool_max_idle = max_idle;
        self
    }

    /// Replace the handler invoked after a fatal record
    #[must_use = "builder methods return a new value"]
    pub fn on_exit(mut self, handler: ExitHandler) -> Self {
        self.on_exit = Some(handler);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            channel: DeliveryChannel::new(self.config.buffer_size),
            config: self.config,
            sink: self
                .sink
                .unwrap_or_else(|| Arc::new(ConsoleSink::stdout())),
            clock: self.clock,
            pool: BufferPool::with_config(self.pool_initial_capacity, self.pool_max_idle),
            metrics: LoggerMetrics::new(),
            on_exit: self.on_exit.unwrap_or_else(default_exit_handler),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
