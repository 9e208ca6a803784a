//! Logging collaborator used by filters and the run coordinator.

/// Sink for run status lines.
///
/// `info` and `error` carry run-level status, `trace` carries the per-rule
/// decisions made by filters. Implementations must be shareable across the
/// worker threads of a run.
pub trait LogSink: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);

    /// Filter decision trace. Dropped unless the sink overrides it.
    fn trace(&self, _message: &str) {}
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
