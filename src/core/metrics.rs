//! Logger metrics for observability
//!
//! Counters for records that passed the level threshold, calls into the
//! sink, sink failures and accumulation-buffer flushes. Sink failures are
//! never reported to the logging call site, so `write_errors` is the only
//! place they show up.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_fast_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_sink_write();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.sink_writes(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records encoded and handed to the delivery channel
    total_logged: AtomicU64,

    /// Calls made into the sink's `write`
    sink_writes: AtomicU64,

    /// Sink writes that returned an error (the bytes are lost)
    write_errors: AtomicU64,

    /// Accumulation-buffer flushes that wrote to the sink
    flushes: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            sink_writes: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_writes(&self) -> u64 {
        self.sink_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Record a delivered record; returns the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_write(&self) -> u64 {
        self.sink_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of sink writes that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn error_rate(&self) -> f64 {
        let writes = self.sink_writes() as f64;
        if writes == 0.0 {
            0.0
        } else {
            (self.write_errors() as f64 / writes) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.sink_writes.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
        self.flushes.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            sink_writes: AtomicU64::new(self.sink_writes()),
            write_errors: AtomicU64::new(self.write_errors()),
            flushes: AtomicU64::new(self.flushes()),
        }
    }
}
