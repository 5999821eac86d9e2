//! Process-wide logger
//!
//! Libraries in one process share a single [`Logger`], created lazily in the
//! uninitialized state (console output, gate at Trace). The functions here
//! drive its lifecycle; the level macros log through it.

use crate::core::{LogLevel, Logger, Result};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

/// Configure the process-wide sink from a destination descriptor.
///
/// See [`Logger::init`].
///
/// ```no_run
/// logurl::init("file:///var/log/app,rotate=day,level=INF").unwrap();
/// logurl::info!("listening on port {}", 8080);
/// logurl::fini();
/// ```
#[track_caller]
pub fn init(descriptor: &str) -> Result<()> {
    logger().init(descriptor)
}

/// Close the process-wide sink and fall back to the console
pub fn fini() {
    logger().fini();
}

/// Set the process-wide gate threshold. See [`Logger::set_level`].
pub fn set_level(level: LogLevel) -> Result<()> {
    logger().set_level(level)
}

/// Current process-wide gate threshold
pub fn level() -> LogLevel {
    logger().level()
}
