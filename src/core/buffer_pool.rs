//! Reusable scratch buffers for record encoding
//!
//! Idle buffers sit in a bounded lock-free queue. A buffer handed out by
//! [`BufferPool::acquire`] belongs to the caller alone until it is passed
//! back to [`BufferPool::release`]; the queue never yields the same buffer
//! twice because it moves ownership in and out.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};

/// Starting capacity of a freshly allocated scratch buffer
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Maximum number of idle buffers kept for reuse
pub const DEFAULT_MAX_IDLE: usize = 64;

/// Pool of byte buffers shared by every call on one logger
///
/// # Example
///
/// ```
/// use rust_fast_logger::BufferPool;
///
/// let pool = BufferPool::new();
/// let mut buf = pool.acquire();
/// buf.extend_from_slice(b"hello");
/// pool.release(buf);
///
/// // The same allocation comes back, emptied
/// let buf = pool.acquire();
/// assert!(buf.is_empty());
/// assert_eq!(pool.allocated_count(), 1);
/// ```
#[derive(Debug)]
pub struct BufferPool {
    idle_tx: Sender<Vec<u8>>,
    idle_rx: Receiver<Vec<u8>>,
    initial_capacity: usize,
    acquired: AtomicU64,
    allocated: AtomicU64,
}

impl BufferPool {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_IDLE)
    }

    /// Create a pool whose new buffers start at `initial_capacity` bytes and
    /// which keeps at most `max_idle` buffers around.
    #[must_use]
    pub fn with_config(initial_capacity: usize, max_idle: usize) -> Self {
        let (idle_tx, idle_rx) = bounded(max_idle.max(1));
        Self {
            idle_tx,
            idle_rx,
            initial_capacity,
            acquired: AtomicU64::new(0),
            allocated: AtomicU64::new(0),
        }
    }

    /// Check out an empty buffer, reusing an idle one when available
    pub fn acquire(&self) -> Vec<u8> {
        self.acquired.fetch_add(1, Ordering::Relaxed);
        match self.idle_rx.try_recv() {
            Ok(mut buf) => {
                buf.clear();
                buf
            }
            Err(_) => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Vec::with_capacity(self.initial_capacity)
            }
        }
    }

    /// Return a buffer to the idle set.
    ///
    /// The buffer is emptied but keeps its capacity. When the idle set is
    /// already full the buffer is dropped.
    pub fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        let _ = self.idle_tx.try_send(buf);
    }

    /// Total number of `acquire` calls
    #[inline]
    pub fn acquired_count(&self) -> u64 {
        self.acquired.load(Ordering::Relaxed)
    }

    /// Number of buffers allocated because no idle buffer was available
    #[inline]
    pub fn allocated_count(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }

    /// Number of buffers currently idle
    #[inline]
    pub fn idle_count(&self) -> usize {
        self.idle_rx.len()
    }

    #[inline]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}
