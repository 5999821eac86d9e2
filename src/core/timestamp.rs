//! Timestamp and line terminator constants for records
//!
//! Records carry local wall-clock time with second precision, and daily
//! rotation names archived files after the local date of their content.

use chrono::{DateTime, Local, NaiveDate};

/// strftime layout of the record timestamp: `2025/01/08 10:30:45`
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// strftime layout of the date suffix on rotated files: `20250108`
pub const ROTATION_DATE_FORMAT: &str = "%Y%m%d";

/// Host line terminator appended by the auto-newline emitters
#[cfg(windows)]
pub const NEWLINE: &str = "\r\n";

/// Host line terminator appended by the auto-newline emitters
#[cfg(not(windows))]
pub const NEWLINE: &str = "\n";

/// Format a local timestamp the way records print it
#[must_use]
pub fn format_record_timestamp(datetime: &DateTime<Local>) -> String {
    datetime.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

/// Format a date as a rotated file suffix
#[must_use]
pub fn format_rotation_date(date: NaiveDate) -> String {
    date.format(ROTATION_DATE_FORMAT).to_string()
}
