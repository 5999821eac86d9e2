//! Logger metrics for observability
//!
//! Emission never reports sink failures to its caller, so these counters are
//! the only place a host can see records that were lost.

use super::error::LoggerError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked with every sink write failure
pub type WriteErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Counters for records passing through a logger
///
/// # Example
///
/// ```
/// use logurl::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.records_suppressed(), 1);
/// assert_eq!(metrics.write_failures(), 0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records handed to a sink successfully
    records_written: AtomicU64,

    /// Records dropped by the severity gate
    records_suppressed: AtomicU64,

    /// Records the sink failed to write
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            records_suppressed: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_suppressed(&self) -> u64 {
        self.records_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record a successfully written entry, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.records_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate as a percentage of attempted writes (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures();
        let attempted = self.records_written() + failed;
        if attempted == 0 {
            0.0
        } else {
            (failed as f64 / attempted as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.records_written(), 0);
        assert_eq!(metrics.records_suppressed(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.failure_rate(), 0.0);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        for _ in 0..90 {
            metrics.record_written();
        }
        for _ in 0..10 {
            metrics.record_write_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_concurrent_increments() {
        let metrics = Arc::new(LoggerMetrics::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.record_written();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.records_written(), 4000);
    }
}
