//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record severity, ordered by increasing urgency.
///
/// Every level except [`LogLevel::Fatal`] can be used as the gate threshold.
/// Fatal records are never gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// The three-letter tag printed between brackets at the start of a record
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRC",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Fatal => "FAT",
        }
    }

    /// Whether the level may be used as the gate threshold
    pub fn is_selectable(&self) -> bool {
        *self != LogLevel::Fatal
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Fatal,
        }
    }
}

/// Parse one of the five selectable tags (`TRC`, `DBG`, `INF`, `WRN`, `ERR`).
///
/// Matching is exact. `FAT` is not a gate threshold and yields `None`.
///
/// ```
/// use logurl::{parse_level, LogLevel};
///
/// assert_eq!(parse_level("WRN"), Some(LogLevel::Warn));
/// assert_eq!(parse_level("FAT"), None);
/// assert_eq!(parse_level("wrn"), None);
/// ```
pub fn parse_level(tag: &str) -> Option<LogLevel> {
    match tag {
        "TRC" => Some(LogLevel::Trace),
        "DBG" => Some(LogLevel::Debug),
        "INF" => Some(LogLevel::Info),
        "WRN" => Some(LogLevel::Warn),
        "ERR" => Some(LogLevel::Error),
        _ => None,
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(s).ok_or_else(|| LoggerError::invalid_level(s))
    }
}
