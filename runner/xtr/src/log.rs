//! Tracing-backed log sink and subscriber setup.

use std::sync::Once;

use xtr_filter::LogSink;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Honors `RUST_LOG`; without it the level is `info`, or `debug` when
/// `verbose` is set (which makes filter decisions visible). Safe to call more
/// than once; only the first call has an effect.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let default_level = if verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(HierarchicalLayer::new(2).with_targets(true))
            .with(filter)
            .try_init();
    });
}

/// [`LogSink`] forwarding to `tracing` under the `xtr` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: "xtr", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "xtr", "{message}");
    }

    fn trace(&self, message: &str) {
        tracing::debug!(target: "xtr::filter", "{message}");
    }
}
