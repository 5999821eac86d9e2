//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A byte destination for rendered records.
///
/// The logger serialises calls, so an implementation only has to write each
/// record with a single contiguous write to keep records from interleaving.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;

    /// Release the underlying resource. Appends after `close` fail.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn name(&self) -> &str;
}
