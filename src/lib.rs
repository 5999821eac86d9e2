//! # logurl
//!
//! A process-wide leveled logger whose destination is chosen once, at
//! startup, from a compact URL-style descriptor.
//!
//! ## Features
//!
//! - **One call to configure**: `file:///var/log/app,rotate=day,level=INF`
//! - **Six levels**: `TRC < DBG < INF < WRN < ERR < FAT`, Fatal exits the process
//! - **Thread Safe**: concurrent emission, exclusive reconfiguration, no
//!   interleaving within a record
//! - **Caller attribution**: every record names the file and line that logged it
//!
//! ```no_run
//! use logurl::{info, warn};
//!
//! logurl::init("file:///var/log/app,rotate=day,level=INF").unwrap();
//! info!("listening on {}", "0.0.0.0:8080");
//! warn!("cache miss rate {}%", 42);
//! logurl::fini();
//! ```
//!
//! Records look like:
//!
//! ```text
//! [INF] 2025/01/08 10:30:45 main.rs:4: listening on 0.0.0.0:8080
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, RotatingFileAppender};
    pub use crate::core::{
        parse_level, Appender, Destination, LineMode, LogEntry, LogLevel, Logger, LoggerError,
        LoggerMetrics, Result, Rotation, SourceLocation,
    };
    pub use crate::global::{fini, init, level, logger, set_level};
}

pub use crate::appenders::{ConsoleAppender, FileAppender, RotatingFileAppender};
pub use crate::core::{
    parse, parse_level, Appender, Destination, LineMode, LogEntry, LogLevel, Logger, LoggerError,
    LoggerMetrics, Result, Rotation, Scheme, SourceLocation, WriteErrorCallback,
    FATAL_EXIT_CODE, NEWLINE,
};
pub use crate::global::{fini, init, level, logger, set_level};
