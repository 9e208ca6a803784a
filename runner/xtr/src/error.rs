//! Error types for the run coordinator and the command line.

use std::path::PathBuf;

use xtr_filter::FilterError;
use xtr_report::UnknownDialect;

/// Failure while loading, discovering or executing one assembly.
///
/// The coordinator never propagates these out of a run: each one is logged
/// and charged to the assembly it came from.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("cannot load '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' is not a valid test manifest: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("discovery failed: {0}")]
    Discovery(String),
    #[error("cannot execute '{test}': {reason}")]
    Execution { test: String, reason: String },
    #[error("panicked: {0}")]
    Panicked(String),
}

/// Errors from parsing `xtr test` arguments.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("option `{0}` requires a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: String, value: String },
    #[error("invalid filter for `{flag}`: {source}")]
    Filter {
        flag: String,
        #[source]
        source: FilterError,
    },
    #[error(transparent)]
    Dialect(#[from] UnknownDialect),
    #[error("no test manifests given")]
    NoAssemblies,
}
