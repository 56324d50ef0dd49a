//! Sink trait for log output destinations

use super::error::Result;

/// Destination for encoded bytes
///
/// Sinks take `&self` and are shared across threads: each implementation
/// serializes its own writes, so one `write` call lands as a contiguous
/// byte run. The logger never retries and never surfaces a sink error to
/// the logging call site.
pub trait Sink: Send + Sync {
    /// Write all of `bytes`
    fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Push anything the sink itself buffers down to the OS
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
