//! The steps around a run: loading manifests and writing result files.

use std::fs;
use std::path::{Path, PathBuf};

use xtr_filter::{LogSink, TestAssemblyInfo};
use xtr_report::{JsonWriter, ReportError, ReportWriter, ResultsTree, Writers};

use crate::config::RunnerConfig;
use crate::manifest::{ManifestAssembly, ManifestFramework};

/// Manifests that loaded, plus how many did not.
pub struct LoadedManifests {
    pub assemblies: Vec<TestAssemblyInfo<ManifestAssembly>>,
    pub failed: usize,
}

/// Load every manifest, logging the ones that cannot be read or parsed.
///
/// A broken manifest is charged like an assembly that failed to run; the
/// remaining manifests still load.
pub fn load_manifests(paths: &[PathBuf], log: &dyn LogSink) -> LoadedManifests {
    let mut loaded = LoadedManifests {
        assemblies: Vec::with_capacity(paths.len()),
        failed: 0,
    };
    for path in paths {
        match ManifestFramework::load(path) {
            Ok(assembly) => loaded.assemblies.push(assembly),
            Err(e) => {
                log.error(&format!("Failed to run assembly '{}': {e}", path.display()));
                loaded.failed += 1;
            }
        }
    }
    loaded
}

/// Write the results file in the configured dialect, and the JSON dump if
/// one was requested.
///
/// Returns the results file path, or `None` when the dialect transform
/// failed (already logged) and no file was created.
pub fn write_results(
    tree: &ResultsTree,
    config: &RunnerConfig,
    writers: &Writers,
    log: &dyn LogSink,
) -> Result<Option<PathBuf>, ReportError> {
    let mut document = Vec::new();
    let wrote = writers.write_report(tree, config.dialect, &mut document, log)?;

    let results_path = if wrote {
        let path = config.results_path();
        create_parent(&path)?;
        fs::write(&path, document)?;
        tracing::debug!(
            path = %path.display(),
            dialect = %config.dialect.resolve(),
            "results written"
        );
        Some(path)
    } else {
        None
    };

    if let Some(json_path) = &config.json_report {
        create_parent(json_path)?;
        fs::write(json_path, JsonWriter.render(tree)?)?;
    }

    Ok(results_path)
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
