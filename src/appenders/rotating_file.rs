//! Rotating file appender with daily rotation
//!
//! Records always go to the configured path. When a record belongs to a later
//! local day than the data already in the file, the file is renamed to
//! `<path>.<YYYYMMDD>` (the day of the data it holds) and a fresh file is
//! opened at the original path.

use super::file::open_append;
use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use crate::core::timestamp::format_rotation_date;
use chrono::{DateTime, Local, NaiveDate};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Day-rotating file appender
///
/// # Examples
///
/// ```no_run
/// use logurl::appenders::RotatingFileAppender;
///
/// let appender = RotatingFileAppender::new("/var/log/app").unwrap();
/// assert_eq!(appender.path().to_str(), Some("/var/log/app"));
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    writer: Option<BufWriter<File>>,
    /// Local date of the data in the current file
    current_day: NaiveDate,
}

impl RotatingFileAppender {
    /// Open the file at `path`, creating it if missing
    ///
    /// The day of an existing file is taken from its modification time, so a
    /// restart on a later day rotates the stale file on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::SinkOpen`] if the file cannot be opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        let (file, current_day) = Self::open_file(&base_path)
            .map_err(|e| LoggerError::sink_open(base_path.display().to_string(), e))?;

        Ok(Self {
            base_path,
            writer: Some(BufWriter::new(file)),
            current_day,
        })
    }

    fn open_file(path: &Path) -> std::io::Result<(File, NaiveDate)> {
        let file = open_append(path)?;
        let modified = file
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or_else(|_| SystemTime::now());
        let modified: DateTime<Local> = modified.into();
        Ok((file, modified.date_naive()))
    }

    /// Whether a record stamped `timestamp` starts a new day
    fn should_rotate(&self, timestamp: &DateTime<Local>) -> bool {
        timestamp.date_naive() > self.current_day
    }

    /// Archive the current file and reopen the base path for `next_day`
    fn rotate(&mut self, next_day: NaiveDate) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            let archive = self.archive_path(self.current_day);
            fs::rename(&self.base_path, &archive).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rename to '{}': {}", archive.display(), e),
                )
            })?;
        }

        let file = open_append(&self.base_path).map_err(|e| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;

        self.writer = Some(BufWriter::new(file));
        self.current_day = next_day;
        Ok(())
    }

    /// First free archive name for `day`: `<path>.<YYYYMMDD>`, then `.1`, `.2`...
    fn archive_path(&self, day: NaiveDate) -> PathBuf {
        let dated = self.dated_path(day);
        if !dated.exists() {
            return dated;
        }

        let mut index = 1;
        loop {
            let mut candidate = dated.clone().into_os_string();
            candidate.push(format!(".{}", index));
            let candidate = PathBuf::from(candidate);
            if !candidate.exists() {
                return candidate;
            }
            index += 1;
        }
    }

    /// Archive name for the data of `day`
    pub fn dated_path(&self, day: NaiveDate) -> PathBuf {
        let mut path = self.base_path.clone().into_os_string();
        path.push(".");
        path.push(format_rotation_date(day));
        PathBuf::from(path)
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Local date of the data in the current file
    pub fn current_day(&self) -> NaiveDate {
        self.current_day
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if self.writer.is_none() {
            return Err(LoggerError::sink_closed(self.base_path.display().to_string()));
        }

        if self.should_rotate(&entry.timestamp) {
            let next_day = entry.timestamp.date_naive();
            if let Err(e) = self.rotate(next_day) {
                // Keep logging into whatever file is at the base path
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    match Self::open_file(&self.base_path) {
                        Ok((file, _)) => self.writer = Some(BufWriter::new(file)),
                        Err(reopen_err) => {
                            eprintln!(
                                "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                                reopen_err
                            );
                            return Err(e);
                        }
                    }
                }

                // Do not retry on every record of the new day
                self.current_day = next_day;
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::sink_closed(self.base_path.display().to_string()))?;

        writer.write_all(entry.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
