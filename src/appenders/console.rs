//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result};
use std::io::{self, Write};

/// Default sink used while no destination is configured.
///
/// Fatal records go to stderr, every other level to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }

    /// Whether records of `level` are routed to stderr
    pub fn uses_stderr(level: LogLevel) -> bool {
        level == LogLevel::Fatal
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = entry.render();

        if Self::uses_stderr(entry.level) {
            let mut stderr = io::stderr().lock();
            stderr.write_all(output.as_bytes())?;
            stderr.flush()?;
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
