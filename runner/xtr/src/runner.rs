//! Run coordinator.
//!
//! Drives a [`TestFramework`] over a list of assemblies, applies the
//! configured filters and collects results into a [`ResultsTree`].
//!
//! Each assembly is built off-lock and merged into the shared run state in
//! one critical section, so an assembly that errors or panics contributes
//! nothing and the run carries on with the next one.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rayon::prelude::*;
use xtr_filter::{LogSink, TestAssemblyInfo};
use xtr_report::{AssemblyNode, Outcome, TestNode};

use crate::config::RunnerConfig;
use crate::error::ExecutionError;
use crate::framework::{DiscoveredTest, TestFramework};
use crate::summary::{FailureInfo, RunOutput};

/// Results of one assembly, before they are merged into the run.
struct AssemblyRun {
    node: AssemblyNode,
    filtered: usize,
    failures: Vec<FailureInfo>,
}

/// Test runner.
pub struct TestRunner<F> {
    framework: F,
    config: RunnerConfig,
    log: Arc<dyn LogSink>,
}

impl<F: TestFramework> TestRunner<F> {
    /// Create a runner with default config (no filters, parallel cases).
    pub fn new(framework: F, log: Arc<dyn LogSink>) -> Self {
        Self::with_config(framework, RunnerConfig::default(), log)
    }

    pub fn with_config(framework: F, config: RunnerConfig, log: Arc<dyn LogSink>) -> Self {
        TestRunner {
            framework,
            config,
            log,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn framework(&self) -> &F {
        &self.framework
    }

    /// Run every assembly in order and return the collected results.
    ///
    /// Never fails: per-assembly errors and panics are logged, counted in
    /// [`ExecutionSummary::errors`](crate::ExecutionSummary::errors) and
    /// the assembly is left out of the tree.
    pub fn run(&self, assemblies: &[TestAssemblyInfo<F::Assembly>]) -> RunOutput {
        let start = Instant::now();
        // Merge point for finished assemblies. Workers return their results
        // by value; only whole assemblies are folded in, under this lock.
        let state = Mutex::new(RunOutput::default());

        for assembly in assemblies {
            if self
                .config
                .filters
                .is_assembly_excluded(assembly, self.log.as_ref())
            {
                self.log.info(&format!(
                    "Excluded: '{}' due to filter",
                    assembly.full_path.display()
                ));
                state.lock().summary.filtered_assemblies += 1;
                continue;
            }

            self.log
                .info(&format!("Running tests for {}", assembly.bare_name()));
            let _span = tracing::info_span!("assembly", name = assembly.bare_name()).entered();

            let result = panic::catch_unwind(AssertUnwindSafe(|| self.run_assembly(assembly)))
                .unwrap_or_else(|payload| {
                    Err(ExecutionError::Panicked(panic_message(payload.as_ref())))
                });

            match result {
                Ok(run) => {
                    let counts = run.node.counts();
                    let mut state = state.lock();
                    state.summary.add_assembly(counts, run.filtered);
                    state.failures.extend(run.failures);
                    state.tree.push(run.node);
                }
                Err(e) => {
                    self.log.error(&format!(
                        "Failed to run assembly '{}': {e}",
                        assembly.full_path.display()
                    ));
                    state.lock().summary.errors += 1;
                }
            }
        }

        let mut output = state.into_inner();
        output.summary.total += output.summary.filtered;
        output.summary.time = start.elapsed();
        self.log_failure_summary(&output.failures);
        output
    }

    /// Discover, filter and execute one assembly.
    fn run_assembly(
        &self,
        assembly: &TestAssemblyInfo<F::Assembly>,
    ) -> Result<AssemblyRun, ExecutionError> {
        let mut filtered = 0;
        let mut selected = Vec::new();
        for test in self.framework.discover(assembly)? {
            let test = test?;
            if self
                .config
                .filters
                .is_test_excluded(&test.case, self.log.as_ref())
            {
                filtered += 1;
            } else {
                selected.push(test);
            }
        }
        tracing::debug!(selected = selected.len(), filtered, "discovered");

        let results = if self.config.parallel && selected.len() > 1 {
            self.execute_parallel(assembly, &selected)?
        } else {
            selected
                .iter()
                .map(|test| self.execute_one(assembly, test))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut node = AssemblyNode::new(
            assembly.full_path.display().to_string(),
            self.framework.name(),
        );
        let mut failures = Vec::new();
        for (test, result) in selected.iter().zip(results) {
            if let Outcome::Fail { message } = &result.outcome {
                failures.push(FailureInfo {
                    assembly: assembly.bare_name().to_string(),
                    test: result.name.clone(),
                    message: message.clone(),
                });
            }
            node.push_test(&test.collection, result);
        }

        Ok(AssemblyRun {
            node,
            filtered,
            failures,
        })
    }

    /// Execute cases on a scoped rayon pool; results keep discovery order.
    ///
    /// Uses `build_scoped` so the pool is torn down before returning.
    fn execute_parallel(
        &self,
        assembly: &TestAssemblyInfo<F::Assembly>,
        tests: &[DiscoveredTest<F::Test>],
    ) -> Result<Vec<TestNode>, ExecutionError> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.config.max_parallel {
            builder = builder.num_threads(threads);
        }

        builder
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    tests
                        .par_iter()
                        .map(|test| self.execute_one(assembly, test))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .unwrap_or_else(|e| {
                tracing::warn!("failed to create thread pool ({e}), running sequentially");
                tests
                    .iter()
                    .map(|test| self.execute_one(assembly, test))
                    .collect()
            })
    }

    fn execute_one(
        &self,
        assembly: &TestAssemblyInfo<F::Assembly>,
        test: &DiscoveredTest<F::Test>,
    ) -> Result<TestNode, ExecutionError> {
        let start = Instant::now();
        let outcome = self.framework.execute(assembly, test)?;
        let time = start.elapsed();

        let name = &test.case.display_name;
        match &outcome {
            Outcome::Pass if self.config.verbose => {
                self.log.info(&format!("\t[PASS] {name} ({time:.2?})"));
            }
            Outcome::Skip { reason } if self.config.verbose => {
                self.log.info(&format!("\t[IGNORED] {name}: {reason}"));
            }
            Outcome::Fail { message } => {
                self.log.error(&format!("\t[FAIL] {name}: {message}"));
            }
            Outcome::Pass | Outcome::Skip { .. } => {}
        }

        Ok(TestNode {
            name: name.clone(),
            type_name: test.case.class_name.clone().unwrap_or_default(),
            method: test.case.method_name.clone().unwrap_or_default(),
            time,
            outcome,
        })
    }

    fn log_failure_summary(&self, failures: &[FailureInfo]) {
        if failures.is_empty() {
            return;
        }
        self.log.info("Failed tests:");
        for (index, failure) in failures.iter().enumerate() {
            self.log.info(&format!(
                "{}) [FAIL] {}: {}",
                index + 1,
                failure.assembly,
                failure.test
            ));
            for line in failure.message.lines() {
                self.log.info(&format!("     {line}"));
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
