//! Logging macros for ergonomic log message formatting.
//!
//! Each level has two macros: the plain one appends the host newline to the
//! payload, the `_raw` one writes the payload exactly as formatted. Arguments
//! follow `format!` syntax. The call site's file and line are captured where
//! the macro is written.
//!
//! Without a target the process-wide logger is used; a leading
//! `logger: <expr>,` logs through a specific [`Logger`](crate::Logger).
//!
//! # Examples
//!
//! ```
//! use logurl::{info, warn_raw, Logger};
//!
//! // Process-wide logger
//! info!("Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!("Server listening on port {}", port);
//!
//! // Explicit logger, caller-provided terminator
//! let logger = Logger::new();
//! warn_raw!(logger: &logger, "disk at {}%\n", 91);
//! ```
//!
//! `fatal!` and `fatal_raw!` are never gated and terminate the process with
//! exit code 1 once the record is written.

/// Log a record at an explicit level and line mode.
///
/// # Examples
///
/// ```
/// use logurl::{log, LineMode, LogLevel};
/// log!(LogLevel::Info, LineMode::WithNewline, "Simple message");
/// log!(LogLevel::Error, LineMode::WithoutNewline, "Error code: {}\n", 500);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $mode:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $mode,
            $crate::SourceLocation::new(file!(), line!()),
            format_args!($($arg)+),
        )
    };
    ($level:expr, $mode:expr, $($arg:tt)+) => {
        $crate::log!(logger: $crate::logger(), $level, $mode, $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_level {
    ($level:ident, $mode:ident, logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(
            logger: $logger,
            $crate::LogLevel::$level,
            $crate::LineMode::$mode,
            $($arg)+
        )
    };
    ($level:ident, $mode:ident, $($arg:tt)+) => {
        $crate::log!(
            logger: $crate::logger(),
            $crate::LogLevel::$level,
            $crate::LineMode::$mode,
            $($arg)+
        )
    };
}

/// Log a trace-level record, terminated by the host newline.
///
/// ```
/// use logurl::trace;
/// trace!("Entering function: calculate()");
/// trace!("Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::__log_level!(Trace, WithNewline, $($arg)+)
    };
}

/// Log a debug-level record, terminated by the host newline.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::__log_level!(Debug, WithNewline, $($arg)+)
    };
}

/// Log an info-level record, terminated by the host newline.
///
/// ```
/// use logurl::info;
/// info!("Application started");
/// info!("Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__log_level!(Info, WithNewline, $($arg)+)
    };
}

/// Log a warning-level record, terminated by the host newline.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__log_level!(Warn, WithNewline, $($arg)+)
    };
}

/// Log an error-level record, terminated by the host newline.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__log_level!(Error, WithNewline, $($arg)+)
    };
}

/// Log a fatal record, terminated by the host newline, then exit with code 1.
///
/// ```no_run
/// use logurl::fatal;
/// fatal!("Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::__log_level!(Fatal, WithNewline, $($arg)+)
    };
}

/// Log a trace-level record without appending a newline.
#[macro_export]
macro_rules! trace_raw {
    ($($arg:tt)+) => {
        $crate::__log_level!(Trace, WithoutNewline, $($arg)+)
    };
}

/// Log a debug-level record without appending a newline.
#[macro_export]
macro_rules! debug_raw {
    ($($arg:tt)+) => {
        $crate::__log_level!(Debug, WithoutNewline, $($arg)+)
    };
}

/// Log an info-level record without appending a newline.
#[macro_export]
macro_rules! info_raw {
    ($($arg:tt)+) => {
        $crate::__log_level!(Info, WithoutNewline, $($arg)+)
    };
}

/// Log a warning-level record without appending a newline.
#[macro_export]
macro_rules! warn_raw {
    ($($arg:tt)+) => {
        $crate::__log_level!(Warn, WithoutNewline, $($arg)+)
    };
}

/// Log an error-level record without appending a newline.
#[macro_export]
macro_rules! error_raw {
    ($($arg:tt)+) => {
        $crate::__log_level!(Error, WithoutNewline, $($arg)+)
    };
}

/// Log a fatal record without appending a newline, then exit with code 1.
#[macro_export]
macro_rules! fatal_raw {
    ($($arg:tt)+) => {
        $crate::__log_level!(Fatal, WithoutNewline, $($arg)+)
    };
}
