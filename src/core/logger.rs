//! Main logger implementation
//!
//! A [`Logger`] owns at most one configured sink. While none is configured,
//! records go to the console: Fatal to stderr, everything else to stdout.
//!
//! Emission takes the state lock shared, so any number of threads log in
//! parallel; `init`, `fini`, `set_level` and `on_write_error` take it
//! exclusively. The sink sits behind its own mutex so every record reaches it
//! as one contiguous write.

use super::{
    appender::Appender,
    descriptor::{Destination, Rotation},
    error::{LoggerError, Result},
    log_entry::{LogEntry, SourceLocation},
    log_level::{parse_level, LogLevel},
    metrics::{LoggerMetrics, WriteErrorCallback},
    timestamp::NEWLINE,
};
use crate::appenders::{ConsoleAppender, FileAppender, RotatingFileAppender};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Exit status of the process after a Fatal record
pub const FATAL_EXIT_CODE: i32 = 1;

/// Whether an emitter appends the host newline to the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Append [`NEWLINE`] after the payload
    WithNewline,
    /// Write the payload as given
    WithoutNewline,
}

struct LoggerState {
    /// Configured sink; `Some` exactly between a successful init and fini
    sink: Option<Mutex<Box<dyn Appender>>>,
    on_write_error: Option<WriteErrorCallback>,
}

pub struct Logger {
    state: RwLock<LoggerState>,
    /// Gate threshold, only stored while `state` is held exclusively
    min_level: AtomicU8,
    /// Sink used while none is configured
    console: Mutex<Box<dyn Appender>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create an uninitialized logger writing to the console, gate at Trace
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_sink(Box::new(ConsoleAppender::new()))
    }

    /// Create an uninitialized logger whose fallback sink is `default_sink`
    /// instead of the console
    #[must_use]
    pub fn with_default_sink(default_sink: Box<dyn Appender>) -> Self {
        Self {
            state: RwLock::new(LoggerState {
                sink: None,
                on_write_error: None,
            }),
            min_level: AtomicU8::new(LogLevel::Trace.as_u8()),
            console: Mutex::new(default_sink),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Configure the sink from a destination descriptor.
    ///
    /// Calling `init` again before [`fini`](Self::fini) leaves the logger
    /// untouched: a Fatal-tagged record saying so goes to the active sink and
    /// `Ok(())` is returned. The process keeps running.
    ///
    /// On error nothing changes. In particular a sink that was opened before
    /// an invalid `level` option was detected is closed again (the file it
    /// created stays on disk).
    ///
    /// # Errors
    ///
    /// Descriptor errors from [`parse`](super::descriptor::parse),
    /// [`LoggerError::SinkOpen`] and [`LoggerError::InvalidLevel`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use logurl::{Logger, LogLevel};
    ///
    /// let logger = Logger::new();
    /// logger.init("file:///var/log/app,rotate=day,level=INF").unwrap();
    /// assert_eq!(logger.level(), LogLevel::Info);
    /// logger.fini();
    /// ```
    #[track_caller]
    pub fn init(&self, descriptor: &str) -> Result<()> {
        let location = SourceLocation::caller();
        let destination: Destination = descriptor.parse()?;

        let mut state = self.state.write();
        if state.sink.is_some() {
            let failure = self.report_already_initialized(&state, location);
            drop(state);
            notify_write_error(failure);
            return Ok(());
        }

        let mut sink = Self::open_sink(&destination)?;

        let level = match destination.level() {
            Some(value) => match parse_level(value) {
                Some(level) => Some(level),
                None => {
                    if let Err(e) = sink.close() {
                        eprintln!(
                            "[LOGGER ERROR] Failed to close sink after rejected init: {}",
                            e
                        );
                    }
                    return Err(LoggerError::invalid_level(value));
                }
            },
            None => None,
        };

        self.install(&mut state, sink, level);
        Ok(())
    }

    /// Configure a caller-provided sink, with the same single-initialization
    /// rule as [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`] if `level` is [`LogLevel::Fatal`]; the
    /// appender is closed in that case.
    #[track_caller]
    pub fn init_with_appender(
        &self,
        mut appender: Box<dyn Appender>,
        level: Option<LogLevel>,
    ) -> Result<()> {
        let location = SourceLocation::caller();

        let mut state = self.state.write();
        if state.sink.is_some() {
            let failure = self.report_already_initialized(&state, location);
            drop(state);
            notify_write_error(failure);
            return Ok(());
        }

        if let Some(level) = level.filter(|l| !l.is_selectable()) {
            if let Err(e) = appender.close() {
                eprintln!(
                    "[LOGGER ERROR] Failed to close sink '{}' after rejected init: {}",
                    appender.name(),
                    e
                );
            }
            return Err(LoggerError::invalid_level(level.tag()));
        }

        self.install(&mut state, appender, level);
        Ok(())
    }

    fn open_sink(destination: &Destination) -> Result<Box<dyn Appender>> {
        Ok(match destination.rotation() {
            Rotation::Day => Box::new(RotatingFileAppender::new(&destination.uri)?),
            Rotation::None => Box::new(FileAppender::new(&destination.uri)?),
        })
    }

    fn install(&self, state: &mut LoggerState, sink: Box<dyn Appender>, level: Option<LogLevel>) {
        state.sink = Some(Mutex::new(sink));
        if let Some(level) = level {
            self.min_level.store(level.as_u8(), Ordering::Release);
        }
    }

    /// The lock is already held exclusively, so write directly
    fn report_already_initialized(
        &self,
        state: &LoggerState,
        location: SourceLocation,
    ) -> Option<WriteFailure> {
        let message = format!("{}{}", LoggerError::AlreadyInitialized, NEWLINE);
        let entry = LogEntry::new(LogLevel::Fatal, message, location);
        self.write_entry(state, &entry)
    }

    /// Close the configured sink, if any, and fall back to the console.
    ///
    /// Safe to call when not initialized. The gate keeps its value.
    pub fn fini(&self) {
        let mut state = self.state.write();
        if let Some(sink) = state.sink.take() {
            let mut sink = sink.into_inner();
            if let Err(e) = sink.close() {
                eprintln!(
                    "[LOGGER ERROR] Failed to close sink '{}' during fini: {}",
                    sink.name(),
                    e
                );
            }
        }
    }

    /// Whether a sink is configured
    pub fn is_initialized(&self) -> bool {
        self.state.read().sink.is_some()
    }

    /// Set the gate threshold.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`] for [`LogLevel::Fatal`], which is not a
    /// threshold; the gate is left unchanged.
    pub fn set_level(&self, level: LogLevel) -> Result<()> {
        if !level.is_selectable() {
            return Err(LoggerError::invalid_level(level.tag()));
        }

        let _state = self.state.write();
        self.min_level.store(level.as_u8(), Ordering::Release);
        Ok(())
    }

    /// Current gate threshold, read without locking
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Acquire))
    }

    /// Whether a record of `level` passes the gate
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level == LogLevel::Fatal || level >= self.level()
    }

    /// Install a callback for records the sink failed to write.
    ///
    /// The callback runs after the logger's locks are released, so it may log,
    /// reconfigure or call [`fini`](Self::fini) on the same logger.
    pub fn on_write_error(&self, callback: WriteErrorCallback) {
        self.state.write().on_write_error = Some(callback);
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Emit one record; for [`LogLevel::Fatal`] the process then exits with
    /// [`FATAL_EXIT_CODE`].
    ///
    /// This is what the level macros expand to.
    pub fn log(
        &self,
        level: LogLevel,
        mode: LineMode,
        location: SourceLocation,
        args: fmt::Arguments<'_>,
    ) {
        self.emit(level, mode, location, args);
        if level == LogLevel::Fatal {
            std::process::exit(FATAL_EXIT_CODE);
        }
    }

    /// Gate, format and write one record without terminating on Fatal.
    ///
    /// Returns whether the record passed the gate.
    pub(crate) fn emit(
        &self,
        level: LogLevel,
        mode: LineMode,
        location: SourceLocation,
        args: fmt::Arguments<'_>,
    ) -> bool {
        let failure = {
            let state = self.state.read();
            if !self.is_enabled(level) {
                self.metrics.record_suppressed();
                return false;
            }

            let mut message = fmt::format(args);
            if mode == LineMode::WithNewline {
                message.push_str(NEWLINE);
            }

            let entry = LogEntry::new(level, message, location);
            self.write_entry(&state, &entry)
        };

        notify_write_error(failure);
        true
    }

    /// Write to the active sink and update the metrics.
    ///
    /// A failure is handed back with the installed hook so the caller can run
    /// it after releasing the state lock.
    fn write_entry(&self, state: &LoggerState, entry: &LogEntry) -> Option<WriteFailure> {
        let target = state.sink.as_ref().unwrap_or(&self.console);

        let result = {
            let mut sink = target.lock();
            sink.append(entry).and_then(|()| {
                if entry.level == LogLevel::Fatal {
                    sink.flush()
                } else {
                    Ok(())
                }
            })
        };

        match result {
            Ok(()) => {
                self.metrics.record_written();
                None
            }
            Err(e) => {
                self.metrics.record_write_failure();
                state
                    .on_write_error
                    .as_ref()
                    .map(|callback| (e, Arc::clone(callback)))
            }
        }
    }
}

/// A sink write error and the hook to report it to
type WriteFailure = (LoggerError, WriteErrorCallback);

/// Must be called without the state lock, the hook may call back into the logger
fn notify_write_error(failure: Option<WriteFailure>) {
    if let Some((error, callback)) = failure {
        callback(&error);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.fini();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Shared in-memory sink; clones see the same buffer
    #[derive(Clone, Default)]
    struct MemorySink {
        buffer: Arc<Mutex<String>>,
        closed: Arc<AtomicUsize>,
    }

    impl MemorySink {
        fn contents(&self) -> String {
            self.buffer.lock().clone()
        }

        fn close_count(&self) -> usize {
            self.closed.load(Ordering::SeqCst)
        }
    }

    impl Appender for MemorySink {
        fn append(&mut self, entry: &LogEntry) -> Result<()> {
            self.buffer.lock().push_str(&entry.render());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    struct FailingSink;

    /// Sink whose close fails, counting the attempts
    #[derive(Clone, Default)]
    struct UnclosableSink {
        close_attempts: Arc<AtomicUsize>,
    }

    impl Appender for UnclosableSink {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.close_attempts.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::sink_closed("unclosable"))
        }

        fn name(&self) -> &str {
            "unclosable"
        }
    }

    impl Appender for FailingSink {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::sink_closed("failing"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn here() -> SourceLocation {
        SourceLocation::new(file!(), line!())
    }

    fn memory_logger() -> (Logger, MemorySink, MemorySink) {
        let fallback = MemorySink::default();
        let logger = Logger::with_default_sink(Box::new(fallback.clone()));
        let sink = MemorySink::default();
        logger
            .init_with_appender(Box::new(sink.clone()), None)
            .unwrap();
        (logger, sink, fallback)
    }

    #[test]
    fn test_new_logger_defaults() {
        let logger = Logger::new();
        assert_eq!(logger.level(), LogLevel::Trace);
        assert!(!logger.is_initialized());
    }

    #[test]
    fn test_emit_with_and_without_newline() {
        let (logger, sink, _) = memory_logger();

        logger.emit(LogLevel::Info, LineMode::WithNewline, here(), format_args!("hello {}", "world"));
        logger.emit(LogLevel::Debug, LineMode::WithoutNewline, here(), format_args!("raw"));

        let contents = sink.contents();
        assert!(contents.starts_with("[INF] "));
        assert!(contents.contains(&format!(": hello world{}[DBG] ", NEWLINE)));
        assert!(contents.ends_with(": raw"));
    }

    #[test]
    fn test_gate_suppresses_lower_levels() {
        let (logger, sink, _) = memory_logger();
        logger.set_level(LogLevel::Warn).unwrap();

        assert!(!logger.emit(LogLevel::Info, LineMode::WithNewline, here(), format_args!("x")));
        assert!(logger.emit(LogLevel::Warn, LineMode::WithNewline, here(), format_args!("y")));
        assert!(logger.emit(LogLevel::Error, LineMode::WithNewline, here(), format_args!("z")));

        let contents = sink.contents();
        assert_eq!(contents.lines().count(), 2);
        assert!(!contents.contains(": x"));
        assert_eq!(logger.metrics().records_suppressed(), 1);
        assert_eq!(logger.metrics().records_written(), 2);
    }

    #[test]
    fn test_fatal_bypasses_gate() {
        let (logger, sink, _) = memory_logger();
        logger.set_level(LogLevel::Error).unwrap();

        assert!(logger.is_enabled(LogLevel::Fatal));
        assert!(logger.emit(LogLevel::Fatal, LineMode::WithNewline, here(), format_args!("boom")));
        assert!(sink.contents().starts_with("[FAT] "));
    }

    #[test]
    fn test_set_level_rejects_fatal() {
        let logger = Logger::new();
        logger.set_level(LogLevel::Info).unwrap();

        let err = logger.set_level(LogLevel::Fatal).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert_eq!(logger.level(), LogLevel::Info);
    }

    #[test]
    fn test_second_init_reports_and_keeps_sink() {
        let (logger, sink, fallback) = memory_logger();
        let other = MemorySink::default();

        let expected_line = line!() + 1;
        logger.init_with_appender(Box::new(other.clone()), Some(LogLevel::Error)).unwrap();

        let contents = sink.contents();
        assert!(contents.starts_with("[FAT] "));
        assert!(contents.contains(&format!(
            "logger.rs:{}: Init must be called only once{}",
            expected_line, NEWLINE
        )));
        assert!(other.contents().is_empty());
        assert_eq!(other.close_count(), 0);
        assert!(fallback.contents().is_empty());
        assert_eq!(logger.level(), LogLevel::Trace);
    }

    #[test]
    fn test_fini_closes_and_restores_default() {
        let (logger, sink, fallback) = memory_logger();

        logger.fini();
        assert_eq!(sink.close_count(), 1);
        assert!(!logger.is_initialized());

        logger.emit(LogLevel::Error, LineMode::WithNewline, here(), format_args!("after fini"));
        assert!(fallback.contents().contains("after fini"));
        assert!(!sink.contents().contains("after fini"));

        // Idempotent
        logger.fini();
        assert_eq!(sink.close_count(), 1);
    }

    #[test]
    fn test_init_with_fatal_level_is_rejected() {
        let logger = Logger::new();
        let sink = MemorySink::default();

        let err = logger
            .init_with_appender(Box::new(sink.clone()), Some(LogLevel::Fatal))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert_eq!(sink.close_count(), 1);
        assert!(!logger.is_initialized());
    }

    #[test]
    fn test_write_errors_are_counted_and_reported() {
        let logger = Logger::new();
        logger.init_with_appender(Box::new(FailingSink), None).unwrap();

        let reported = Arc::new(AtomicUsize::new(0));
        let reported_clone = Arc::clone(&reported);
        logger.on_write_error(Arc::new(move |err| {
            assert!(matches!(err, LoggerError::SinkClosed { .. }));
            reported_clone.fetch_add(1, Ordering::SeqCst);
        }));

        for _ in 0..3 {
            logger.emit(LogLevel::Info, LineMode::WithNewline, here(), format_args!("lost"));
        }

        assert_eq!(logger.metrics().write_failures(), 3);
        assert_eq!(reported.load(Ordering::SeqCst), 3);
    }

    /// Run `f` on a worker thread, failing the test if it does not return
    fn assert_returns(f: impl FnOnce() + Send + 'static) {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            f();
            let _ = tx.send(());
        });
        rx.recv_timeout(Duration::from_secs(5))
            .expect("logger call did not return");
    }

    #[test]
    fn test_write_error_callback_can_call_fini() {
        let logger = Arc::new(Logger::with_default_sink(Box::new(MemorySink::default())));
        logger.init_with_appender(Box::new(FailingSink), None).unwrap();

        let weak = Arc::downgrade(&logger);
        logger.on_write_error(Arc::new(move |_| {
            if let Some(logger) = weak.upgrade() {
                logger.fini();
            }
        }));

        let worker = Arc::clone(&logger);
        assert_returns(move || {
            worker.emit(LogLevel::Info, LineMode::WithNewline, here(), format_args!("lost"));
        });

        assert!(!logger.is_initialized());
        assert_eq!(logger.metrics().write_failures(), 1);
    }

    #[test]
    fn test_write_error_callback_can_log_during_second_init() {
        let fallback = MemorySink::default();
        let logger = Arc::new(Logger::with_default_sink(Box::new(fallback.clone())));
        logger.init_with_appender(Box::new(FailingSink), None).unwrap();

        let weak = Arc::downgrade(&logger);
        logger.on_write_error(Arc::new(move |err| {
            if let Some(logger) = weak.upgrade() {
                assert!(logger.is_initialized());
                logger.fini();
                logger.emit(
                    LogLevel::Error,
                    LineMode::WithNewline,
                    here(),
                    format_args!("sink failed: {}", err),
                );
            }
        }));

        let worker = Arc::clone(&logger);
        assert_returns(move || {
            worker
                .init_with_appender(Box::new(MemorySink::default()), None)
                .unwrap();
        });

        assert!(!logger.is_initialized());
        assert!(fallback.contents().starts_with("[ERR] "));
        assert!(fallback.contents().contains("sink failed: "));
    }

    #[test]
    fn test_rejected_init_still_attempts_close() {
        let logger = Logger::new();
        let sink = UnclosableSink::default();

        let err = logger
            .init_with_appender(Box::new(sink.clone()), Some(LogLevel::Fatal))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert_eq!(sink.close_attempts.load(Ordering::SeqCst), 1);
        assert!(!logger.is_initialized());
    }

    #[test]
    fn test_drop_closes_sink() {
        let sink = MemorySink::default();
        {
            let logger = Logger::new();
            logger.init_with_appender(Box::new(sink.clone()), None).unwrap();
        }
        assert_eq!(sink.close_count(), 1);
    }
}
