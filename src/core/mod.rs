//! Core logger types and traits

pub mod appender;
pub mod descriptor;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use appender::Appender;
pub use descriptor::{parse, Destination, Rotation, Scheme};
pub use error::{LoggerError, Result};
pub use log_entry::{LogEntry, SourceLocation};
pub use log_level::{parse_level, LogLevel};
pub use logger::{LineMode, Logger, FATAL_EXIT_CODE};
pub use metrics::{LoggerMetrics, WriteErrorCallback};
pub use timestamp::NEWLINE;
