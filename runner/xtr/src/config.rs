//! Run configuration and `xtr test` argument parsing.
//!
//! Filter flags come in include/exclude pairs:
//!
//! ```text
//! --method=<name>         --no-method=<name>
//! --class=<name>          --no-class=<name>
//! --namespace=<name>      --no-namespace=<name>
//! --trait=<name[=value]>  --no-trait=<name[=value]>
//! ```
//!
//! `--assembly=<name>` scopes the filter flags that follow it to one
//! assembly, until the next `--assembly=` (an empty name clears the scope).
//! A scoped filter also gates whole assemblies:
//! `--assembly=Foo.Tests --no-class=Foo` skips `Foo.Tests` entirely,
//! `--assembly=Foo.Tests --class=Foo` skips every other assembly.

use std::path::PathBuf;

use xtr_filter::{Filter, FilterCollection};
use xtr_report::Dialect;

use crate::error::CliError;

/// Default results file name.
pub const DEFAULT_RESULTS_FILE: &str = "TestResults.xUnit.xml";

/// Configuration for a run.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Ordered filter rules.
    pub filters: FilterCollection,
    /// Run the cases of one assembly in parallel.
    pub parallel: bool,
    /// Worker cap for parallel execution; `None` uses rayon's default.
    pub max_parallel: Option<usize>,
    /// Log every case result, not just failures.
    pub verbose: bool,
    /// Dialect of the results file.
    pub dialect: Dialect,
    /// Directory the results file is written to.
    pub results_dir: PathBuf,
    pub results_file: String,
    /// Also dump the results tree as JSON here.
    pub json_report: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            filters: FilterCollection::new(),
            parallel: true,
            max_parallel: None,
            verbose: false,
            dialect: Dialect::Unspecified,
            results_dir: PathBuf::from("."),
            results_file: DEFAULT_RESULTS_FILE.to_string(),
            json_report: None,
        }
    }
}

impl RunnerConfig {
    /// Full path of the results file.
    pub fn results_path(&self) -> PathBuf {
        self.results_dir.join(&self.results_file)
    }
}

/// Parsed `xtr test` invocation.
#[derive(Clone, Debug, Default)]
pub struct TestCommand {
    /// Test manifests, in run order.
    pub manifests: Vec<PathBuf>,
    pub config: RunnerConfig,
}

/// Parse the arguments following `xtr test`.
///
/// Flags and manifest paths may be interleaved. `-o <dir>` takes its value
/// from the next argument; every other option uses `--flag=value`.
pub fn parse_test_args(args: &[String]) -> Result<TestCommand, CliError> {
    let mut command = TestCommand::default();
    let mut scope: Option<String> = None;
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        if arg == "-o" {
            let dir = args
                .next()
                .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
            command.config.results_dir = PathBuf::from(dir);
        } else if arg == "-v" {
            command.config.verbose = true;
        } else if let Some(option) = arg.strip_prefix("--") {
            let (flag, value) = match option.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (option, None),
            };
            if flag == "assembly" {
                scope = value.filter(|name| !name.is_empty()).map(str::to_string);
            } else {
                apply_option(&mut command.config, flag, value, scope.as_deref())?;
            }
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownFlag(arg.clone()));
        } else {
            command.manifests.push(PathBuf::from(arg));
        }
    }

    if command.manifests.is_empty() {
        return Err(CliError::NoAssemblies);
    }
    Ok(command)
}

fn apply_option(
    config: &mut RunnerConfig,
    flag: &str,
    value: Option<&str>,
    scope: Option<&str>,
) -> Result<(), CliError> {
    let required = || {
        value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CliError::MissingValue(format!("--{flag}")))
    };

    match flag {
        "verbose" => config.verbose = true,
        "no-parallel" => config.parallel = false,
        "max-parallel" => {
            let raw = required()?;
            let threads = raw
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| CliError::InvalidValue {
                    flag: format!("--{flag}"),
                    value: raw.to_string(),
                })?;
            config.max_parallel = Some(threads);
        }
        "format" => config.dialect = required()?.parse()?,
        "results-dir" => config.results_dir = PathBuf::from(required()?),
        "results-file" => config.results_file = required()?.to_string(),
        "json" => config.json_report = Some(PathBuf::from(required()?)),
        "method" | "no-method" | "class" | "no-class" | "namespace" | "no-namespace" | "trait"
        | "no-trait" => {
            let filter = parse_filter(flag, required()?)?;
            config.filters.add(match scope {
                Some(assembly) => filter.with_assembly(assembly),
                None => filter,
            });
        }
        _ => return Err(CliError::UnknownFlag(format!("--{flag}"))),
    }
    Ok(())
}

/// Build a filter from a `--[no-]<kind>=<selector>` flag.
fn parse_filter(flag: &str, selector: &str) -> Result<Filter, CliError> {
    let (kind, exclude) = match flag.strip_prefix("no-") {
        Some(kind) => (kind, true),
        None => (flag, false),
    };

    match kind {
        "method" => Filter::by_test_name(selector, exclude),
        "class" => Filter::by_class_name(selector, exclude),
        "namespace" => Filter::by_namespace(selector, exclude),
        "trait" => {
            let (name, value) = match selector.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (selector, None),
            };
            Filter::by_trait(name, value, exclude)
        }
        _ => return Err(CliError::UnknownFlag(format!("--{flag}"))),
    }
    .map_err(|source| CliError::Filter {
        flag: format!("--{flag}"),
        source,
    })
}
