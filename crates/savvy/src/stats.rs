//! Counters reported by the batch jobs.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

/// Outcome counts of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Symbols attempted.
    pub total: usize,
    /// Symbols whose rows were written.
    pub saved: usize,
    /// Symbols with nothing to write.
    pub skipped: usize,
    /// Symbols that failed and were left out.
    pub errors: usize,
    /// Rows written across all tables.
    pub rows: usize,
    /// Wall-clock duration of the run.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SyncStats {
    /// Empty counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of attempted symbols that were saved, in percent.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.saved as f64 / self.total as f64) * 100.0
        }
    }

    /// Log the final counters.
    pub fn log_summary(&self, operation: &str) {
        info!(
            operation,
            total = self.total,
            saved = self.saved,
            skipped = self.skipped,
            errors = self.errors,
            rows = self.rows,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "Sync complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_success_rate() {
        assert_relative_eq!(SyncStats::new().success_rate(), 0.0);

        let stats = SyncStats {
            total: 4,
            saved: 3,
            errors: 1,
            ..Default::default()
        };
        assert_relative_eq!(stats.success_rate(), 75.0);
    }
}
