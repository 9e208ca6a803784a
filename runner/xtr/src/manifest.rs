//! A framework whose assemblies are JSON manifests of shell commands.
//!
//! ```json
//! {
//!   "collections": [
//!     {
//!       "name": "math",
//!       "tests": [
//!         { "class": "Foo.Tests.Math", "method": "Adds",
//!           "traits": { "Category": ["Fast"] },
//!           "command": ["./adds", "--quiet"] },
//!         { "class": "Foo.Tests.Math", "method": "Divides",
//!           "command": ["./divides"], "skip": "flaky on CI" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A case passes when its command exits with status 0. Commands run with
//! the manifest's directory as working directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde::Deserialize;
use xtr_filter::{TestAssemblyInfo, TestCase, Traits};
use xtr_report::Outcome;

use crate::error::ExecutionError;
use crate::framework::{CaseOutcome, DiscoveredTest, Discovery, TestFramework};

/// Lines of stderr kept in a failure message.
const STDERR_TAIL_LINES: usize = 20;

/// Parsed manifest file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub collections: Vec<ManifestCollection>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ManifestCollection {
    pub name: String,
    #[serde(default)]
    pub tests: Vec<ManifestTest>,
}

/// One test entry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ManifestTest {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    /// Defaults to `class.method`.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub traits: Traits,
    /// Program followed by its arguments.
    #[serde(default)]
    pub command: Vec<String>,
    /// Skip reason; the command is not run.
    #[serde(default)]
    pub skip: Option<String>,
}

impl ManifestTest {
    fn display_name(&self) -> Option<String> {
        if let Some(name) = &self.display_name {
            return Some(name.clone());
        }
        match (&self.class, &self.method) {
            (Some(class), Some(method)) => Some(format!("{class}.{method}")),
            (None, Some(name)) | (Some(name), None) => Some(name.clone()),
            (None, None) => None,
        }
    }
}

/// Loaded manifest plus the directory its commands run in.
#[derive(Clone, Debug)]
pub struct ManifestAssembly {
    pub manifest: Manifest,
    pub base_dir: PathBuf,
}

/// Test framework driving manifest assemblies.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManifestFramework;

impl ManifestFramework {
    pub fn new() -> Self {
        ManifestFramework
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<TestAssemblyInfo<ManifestAssembly>, ExecutionError> {
        let source = std::fs::read_to_string(path).map_err(|source| ExecutionError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = serde_json::from_str(&source).map_err(|source| ExecutionError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        Ok(TestAssemblyInfo::new(
            path,
            ManifestAssembly { manifest, base_dir },
        ))
    }
}

impl TestFramework for ManifestFramework {
    type Assembly = ManifestAssembly;
    type Test = ManifestTest;

    fn name(&self) -> &str {
        "xtr-manifest"
    }

    fn discover<'a>(
        &'a self,
        assembly: &'a TestAssemblyInfo<ManifestAssembly>,
    ) -> Result<Discovery<'a, ManifestTest>, ExecutionError> {
        let collections = &assembly.assembly.manifest.collections;
        Ok(Box::new(collections.iter().flat_map(|collection| {
            collection
                .tests
                .iter()
                .enumerate()
                .map(move |(index, test)| discovered(&collection.name, index, test))
        })))
    }

    fn execute(
        &self,
        assembly: &TestAssemblyInfo<ManifestAssembly>,
        test: &DiscoveredTest<ManifestTest>,
    ) -> Result<CaseOutcome, ExecutionError> {
        if let Some(reason) = &test.test.skip {
            return Ok(Outcome::Skip {
                reason: reason.clone(),
            });
        }
        let Some((program, args)) = test.test.command.split_first() else {
            return Err(ExecutionError::Execution {
                test: test.case.display_name.clone(),
                reason: "manifest entry has no command".to_string(),
            });
        };

        tracing::trace!(test = %test.case.display_name, %program, "spawning");
        let output = Command::new(program)
            .args(args)
            .current_dir(&assembly.assembly.base_dir)
            .stdin(Stdio::null())
            .output();

        Ok(match output {
            Ok(output) if output.status.success() => Outcome::Pass,
            Ok(output) => Outcome::Fail {
                message: failure_message(&output),
            },
            Err(e) => Outcome::Fail {
                message: format!("cannot start `{program}`: {e}"),
            },
        })
    }
}

fn discovered(
    collection: &str,
    index: usize,
    test: &ManifestTest,
) -> Result<DiscoveredTest<ManifestTest>, ExecutionError> {
    let display_name = test.display_name().ok_or_else(|| {
        ExecutionError::Discovery(format!(
            "test #{index} in collection '{collection}' has no name"
        ))
    })?;

    Ok(DiscoveredTest {
        case: TestCase {
            display_name,
            class_name: test.class.clone(),
            method_name: test.method.clone(),
            traits: test.traits.clone(),
        },
        collection: collection.to_string(),
        test: test.clone(),
    })
}

/// Exit status followed by the last lines of stderr.
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let tail = &lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..];

    if tail.is_empty() {
        output.status.to_string()
    } else {
        format!("{}\n{}", output.status, tail.join("\n"))
    }
}
