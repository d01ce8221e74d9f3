//! Execution statistics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Outcome of one operator execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Sink for per-execution outcome and latency.
///
/// Operators record every execution, including ones that fail while
/// rendering or routing, before the error propagates to the caller.
pub trait StatsSink: Send + Sync {
    fn record(&self, outcome: Outcome, elapsed: Duration);
}

/// Atomic-counter sink, cheap enough to share across all operators of a
/// mapper.
#[derive(Debug, Default)]
pub struct ExecutionStats {
    executions: AtomicU64,
    failures: AtomicU64,
    elapsed_micros: AtomicU64,
}

impl ExecutionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            executions: self.executions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            total_elapsed: Duration::from_micros(self.elapsed_micros.load(Ordering::Relaxed)),
        }
    }
}

impl StatsSink for ExecutionStats {
    fn record(&self, outcome: Outcome, elapsed: Duration) {
        self.executions.fetch_add(1, Ordering::Relaxed);
        if outcome == Outcome::Failure {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        self.elapsed_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }
}

/// Counters captured by [`ExecutionStats::snapshot`].
#[derive(Clone, Debug)]
pub struct StatsSnapshot {
    pub executions: u64,
    pub failures: u64,
    pub total_elapsed: Duration,
}

impl StatsSnapshot {
    /// Failures as a fraction of all executions
    pub fn failure_rate(&self) -> f64 {
        if self.executions == 0 {
            0.0
        } else {
            self.failures as f64 / self.executions as f64
        }
    }
}
