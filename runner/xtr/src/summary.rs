//! Run totals and failure records.

use std::time::Duration;

use serde::Serialize;
use xtr_report::{Counts, ResultsTree};

/// Aggregate counters for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    /// Executed cases plus cases removed by filters.
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Assemblies that aborted with an error or panic.
    pub errors: usize,
    /// Cases removed by filters.
    pub filtered: usize,
    /// Assemblies skipped by assembly-level filters.
    pub filtered_assemblies: usize,
    /// Wall-clock time of the run.
    pub time: Duration,
}

impl ExecutionSummary {
    pub fn new() -> Self {
        ExecutionSummary::default()
    }

    /// Fold one finished assembly into the totals.
    pub fn add_assembly(&mut self, counts: Counts, filtered: usize) {
        self.total += counts.total;
        self.passed += counts.passed;
        self.failed += counts.failed;
        self.skipped += counts.skipped;
        self.filtered += filtered;
    }

    /// Cases that actually ran (or were reported as skipped by the framework).
    pub fn executed(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errors > 0
    }

    /// Get exit code: 0 = all pass, 1 = failures or assembly errors, 2 = nothing ran.
    ///
    /// A run whose cases or assemblies were all filtered out counts as
    /// nothing ran.
    pub fn exit_code(&self) -> i32 {
        if self.executed() == 0 && self.errors == 0 {
            2
        } else {
            i32::from(self.has_failures())
        }
    }
}

/// A failed case, kept for the end-of-run summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureInfo {
    /// Bare name of the assembly the case belongs to.
    pub assembly: String,
    pub test: String,
    pub message: String,
}

/// Everything a run produces.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub tree: ResultsTree,
    pub summary: ExecutionSummary,
    pub failures: Vec<FailureInfo>,
}
