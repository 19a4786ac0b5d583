use std::time::Instant;

use pf_core::{RunSummary, Timestamp};

/// Run-wide counters. Only finalized, non-retried attempts are recorded.
#[derive(Debug, Clone)]
pub struct RunStatus {
    passed: usize,
    failed: usize,
    total: usize,
    started_at: Instant,
    run_started: Option<Timestamp>,
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatus {
    pub fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            total: 0,
            started_at: Instant::now(),
            run_started: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn mark_run_started(&mut self, timestamp: Option<Timestamp>) {
        self.run_started = timestamp;
    }

    /// Counters with wall-clock time elapsed since creation or last reset.
    pub fn snapshot(&self) -> RunSummary {
        self.summary(self.started_at.elapsed().as_millis() as u64)
    }

    /// Prefers protocol timestamps so that replays of recorded streams report
    /// the recorded duration.
    pub fn finish(&self, run_finished: Option<Timestamp>) -> RunSummary {
        match (self.run_started, run_finished) {
            (Some(started), Some(finished)) => {
                let elapsed = finished.as_millis().saturating_sub(started.as_millis());
                self.summary(elapsed.max(0) as u64)
            }
            _ => self.snapshot(),
        }
    }

    fn summary(&self, duration_ms: u64) -> RunSummary {
        RunSummary {
            passed: self.passed,
            failed: self.failed,
            total: self.total,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[test]
    fn record_splits_passed_and_failed() {
        let mut status = RunStatus::new();
        status.record(true);
        status.record(false);
        status.record(false);
        let summary = status.snapshot();
        assert_eq!((summary.passed, summary.failed, summary.total), (1, 2, 3));
    }

    #[test]
    fn finish_uses_protocol_timestamps_when_both_are_known() {
        let mut status = RunStatus::new();
        status.mark_run_started(Some(Timestamp {
            seconds: 100,
            nanos: 0,
        }));
        let summary = status.finish(Some(Timestamp {
            seconds: 125,
            nanos: 250_000_000,
        }));
        assert_eq!(summary.duration_ms, 25_250);

        let backwards = status.finish(Some(Timestamp {
            seconds: 90,
            nanos: 0,
        }));
        assert_eq!(backwards.duration_ms, 0);
    }

    #[test]
    fn finish_saturates_extreme_timestamp_spans() {
        let mut status = RunStatus::new();
        status.mark_run_started(Some(Timestamp {
            seconds: i64::MIN / 10,
            nanos: 0,
        }));
        let summary = status.finish(Some(Timestamp {
            seconds: i64::MAX / 10,
            nanos: 0,
        }));
        assert_eq!(summary.duration_ms, i64::MAX as u64);
    }

    #[test]
    fn reset_clears_counters() {
        let mut status = RunStatus::new();
        status.record(true);
        status.mark_run_started(Some(Timestamp {
            seconds: 1,
            nanos: 0,
        }));
        status.reset();
        let summary = status.finish(None);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.passed, 0);
    }
}
