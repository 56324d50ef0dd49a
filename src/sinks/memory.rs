//! In-memory sink

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    bytes: Vec<u8>,
    writes: usize,
}

/// Collects everything written to it
///
/// Clones share the same storage, so a clone can be handed to a logger and
/// the first one inspected afterwards.
///
/// # Example
///
/// ```
/// use rust_fast_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().sink(sink.clone()).build();
///
/// logger.info("hello", &[]);
/// assert!(sink.contents_string().ends_with("INFO hello\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all bytes written so far
    pub fn contents(&self) -> Vec<u8> {
        self.state.lock().bytes.clone()
    }

    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.state.lock().bytes).into_owned()
    }

    /// Written content split into lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents_string().lines().map(String::from).collect()
    }

    /// Number of `write` calls received
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.bytes.clear();
        state.writes = 0;
    }
}

impl Sink for MemorySink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock();
        state.bytes.extend_from_slice(bytes);
        state.writes += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
