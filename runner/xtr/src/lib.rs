//! xtr: run filtered test assemblies and report the results.
//!
//! # Architecture
//!
//! ```text
//! manifests ──► ManifestFramework::load ──► TestAssemblyInfo<ManifestAssembly>
//!                                                │
//!                                                ▼
//!   RunnerConfig.filters ──────────────► TestRunner::run
//!                                                │  per assembly: filter, discover,
//!                                                │  filter cases, execute (rayon)
//!                                                ▼
//!                         RunOutput { tree, summary, failures }
//!                                                │
//!                                                ▼
//!                           Writers::write_report (xunit / nunitv2 / nunitv3)
//! ```
//!
//! The filter engine lives in `xtr_filter`, the results tree and dialect
//! writers in `xtr_report`; both are re-exported here.

mod config;
mod error;
mod framework;
mod log;
mod manifest;
mod runner;
mod session;
mod summary;

pub use config::{parse_test_args, RunnerConfig, TestCommand, DEFAULT_RESULTS_FILE};
pub use error::{CliError, ExecutionError};
pub use framework::{CaseOutcome, DiscoveredTest, Discovery, TestFramework};
pub use log::{init_tracing, TracingLog};
pub use manifest::{
    Manifest, ManifestAssembly, ManifestCollection, ManifestFramework, ManifestTest,
};
pub use runner::TestRunner;
pub use session::{load_manifests, write_results, LoadedManifests};
pub use summary::{ExecutionSummary, FailureInfo, RunOutput};

pub use xtr_filter as filter;
pub use xtr_report as report;
