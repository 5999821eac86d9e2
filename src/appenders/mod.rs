//! Appender implementations

pub mod console;
pub mod file;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use rotating_file::RotatingFileAppender;

// Re-exported for appender implementors
pub use crate::core::Appender;
