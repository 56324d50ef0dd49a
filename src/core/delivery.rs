//! Delivery of encoded records to the sink
//!
//! With a zero capacity every record goes straight to the sink. With a
//! positive capacity records accumulate in memory behind a mutex and reach
//! the sink in batches.
//!
//! The unbuffered path takes no logger-side lock. Each record (newline
//! included) is handed to the sink in a single `write` call, so whether two
//! concurrent records can interleave depends only on the sink. The sinks in
//! this crate serialize their writes; a custom sink that does not may see
//! interleaved output under concurrent logging.

use super::metrics::LoggerMetrics;
use super::sink::Sink;
use parking_lot::Mutex;

/// Upper bound on the accumulation buffer's up-front reservation; larger
/// capacities grow on demand
const MAX_INITIAL_RESERVE: usize = 64 * 1024;

#[derive(Debug)]
pub enum DeliveryChannel {
    /// Write-through: one sink write per record
    Unbuffered,

    /// Accumulate records and flush when the next one would overflow
    Buffered {
        capacity: usize,
        accumulation: Mutex<Vec<u8>>,
    },
}

impl DeliveryChannel {
    /// Build a channel for `capacity` bytes; zero means unbuffered
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            DeliveryChannel::Unbuffered
        } else {
            DeliveryChannel::Buffered {
                capacity,
                accumulation: Mutex::new(Vec::with_capacity(capacity.min(MAX_INITIAL_RESERVE))),
            }
        }
    }

    pub fn capacity(&self) -> usize {
        match self {
            DeliveryChannel::Unbuffered => 0,
            DeliveryChannel::Buffered { capacity, .. } => *capacity,
        }
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self, DeliveryChannel::Buffered { .. })
    }

    /// Bytes currently waiting in the accumulation buffer
    pub fn pending_len(&self) -> usize {
        match self {
            DeliveryChannel::Unbuffered => 0,
            DeliveryChannel::Buffered { accumulation, .. } => accumulation.lock().len(),
        }
    }

    /// Deliver one encoded record (without its trailing newline).
    ///
    /// In unbuffered mode the newline is appended to `record` in place and
    /// the whole line is written at once. In buffered mode, if the pending
    /// bytes plus `record` exceed the capacity, the pending bytes are
    /// flushed first; the record is then appended in full, even when it is
    /// larger than the capacity on its own.
    pub fn deliver(&self, record: &mut Vec<u8>, sink: &dyn Sink, metrics: &LoggerMetrics) {
        match self {
            DeliveryChannel::Unbuffered => {
                record.push(b'\n');
                write_to_sink(sink, record, metrics);
            }
            DeliveryChannel::Buffered {
                capacity,
                accumulation,
            } => {
                let mut pending = accumulation.lock();
                if pending.len() + record.len() > *capacity {
                    flush_locked(&mut pending, sink, metrics);
                }
                pending.extend_from_slice(record);
                pending.push(b'\n');
            }
        }
    }

    /// Write any pending bytes to the sink and empty the accumulation
    /// buffer, keeping its allocation. Does nothing when unbuffered or when
    /// nothing is pending.
    pub fn flush(&self, sink: &dyn Sink, metrics: &LoggerMetrics) {
        if let DeliveryChannel::Buffered { accumulation, .. } = self {
            let mut pending = accumulation.lock();
            flush_locked(&mut pending, sink, metrics);
        }
    }
}

// Caller holds the accumulation lock
fn flush_locked(pending: &mut Vec<u8>, sink: &dyn Sink, metrics: &LoggerMetrics) {
    if pending.is_empty() {
        return;
    }
    write_to_sink(sink, pending, metrics);
    metrics.record_flush();
    pending.clear();
}

fn write_to_sink(sink: &dyn Sink, bytes: &[u8], metrics: &LoggerMetrics) {
    metrics.record_sink_write();
    if sink.write(bytes).is_err() {
        metrics.record_write_error();
    }
}
