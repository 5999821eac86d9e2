//! Log entry structure

use super::log_level::LogLevel;
use super::timestamp::format_record_timestamp;
use chrono::{DateTime, Local};
use std::fmt;

/// File and line of the code that issued a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    /// Build a location from `file!()` / `line!()` style parts
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Final path component of the file, accepting either separator
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Payload, including any terminator the emitter appended
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub location: SourceLocation,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, location: SourceLocation) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
            location,
        }
    }

    /// Override the capture time
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render the record exactly as sinks write it:
    /// `[TAG] YYYY/MM/DD HH:MM:SS file.rs:LINE: message`
    ///
    /// The message is copied verbatim, so the record ends with a newline only
    /// if the message does.
    pub fn render(&self) -> String {
        let timestamp = format_record_timestamp(&self.timestamp);
        let mut output = String::with_capacity(
            self.message.len() + timestamp.len() + self.location.short_file().len() + 20,
        );
        output.push('[');
        output.push_str(self.level.tag());
        output.push_str("] ");
        output.push_str(&timestamp);
        output.push(' ');
        output.push_str(&self.location.to_string());
        output.push_str(": ");
        output.push_str(&self.message);
        output
    }
}
