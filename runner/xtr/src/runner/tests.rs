use super::*;
use crate::framework::Discovery;
use pretty_assertions::assert_eq;
use xtr_filter::{Filter, FilterCollection, TestCase};

/// What a fake case does when executed.
#[derive(Clone, Debug)]
enum Behaviour {
    Pass,
    Fail(&'static str),
    Skip,
    Panic,
    Break,
}

struct FakeCase {
    collection: &'static str,
    case: TestCase,
    behaviour: Behaviour,
}

#[derive(Default)]
struct FakeAssembly {
    cases: Vec<FakeCase>,
    broken_discovery: bool,
}

impl FakeAssembly {
    fn with(mut self, collection: &'static str, case: TestCase, behaviour: Behaviour) -> Self {
        self.cases.push(FakeCase {
            collection,
            case,
            behaviour,
        });
        self
    }
}

#[derive(Default)]
struct FakeFramework {
    discovered: Mutex<Vec<String>>,
    executed: Mutex<Vec<String>>,
}

impl TestFramework for FakeFramework {
    type Assembly = FakeAssembly;
    type Test = Behaviour;

    fn name(&self) -> &str {
        "fake"
    }

    fn discover<'a>(
        &'a self,
        assembly: &'a TestAssemblyInfo<FakeAssembly>,
    ) -> Result<Discovery<'a, Behaviour>, ExecutionError> {
        self.discovered
            .lock()
            .push(assembly.bare_name().to_string());
        if assembly.assembly.broken_discovery {
            return Err(ExecutionError::Discovery("cannot enumerate".into()));
        }
        Ok(Box::new(assembly.assembly.cases.iter().map(|c| {
            Ok::<_, ExecutionError>(DiscoveredTest {
                case: c.case.clone(),
                collection: c.collection.to_string(),
                test: c.behaviour.clone(),
            })
        })))
    }

    fn execute(
        &self,
        _assembly: &TestAssemblyInfo<FakeAssembly>,
        test: &DiscoveredTest<Behaviour>,
    ) -> Result<Outcome, ExecutionError> {
        self.executed.lock().push(test.case.display_name.clone());
        match test.test {
            Behaviour::Pass => Ok(Outcome::Pass),
            Behaviour::Fail(message) => Ok(Outcome::Fail {
                message: message.to_string(),
            }),
            Behaviour::Skip => Ok(Outcome::Skip {
                reason: "skipped".into(),
            }),
            Behaviour::Panic => panic!("case blew up"),
            Behaviour::Break => Err(ExecutionError::Execution {
                test: test.case.display_name.clone(),
                reason: "host crashed".into(),
            }),
        }
    }
}

#[derive(Default)]
struct CaptureLog {
    info: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    traces: Mutex<Vec<String>>,
}

impl LogSink for CaptureLog {
    fn info(&self, message: &str) {
        self.info.lock().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn trace(&self, message: &str) {
        self.traces.lock().push(message.to_string());
    }
}

fn runner(config: RunnerConfig) -> (TestRunner<FakeFramework>, Arc<CaptureLog>) {
    let log = Arc::new(CaptureLog::default());
    let sink: Arc<dyn LogSink> = log.clone();
    (
        TestRunner::with_config(FakeFramework::default(), config, sink),
        log,
    )
}

fn sequential() -> RunnerConfig {
    RunnerConfig {
        parallel: false,
        ..RunnerConfig::default()
    }
}

fn healthy(name: &str) -> TestAssemblyInfo<FakeAssembly> {
    TestAssemblyInfo::new(
        format!("/bin/{name}.json"),
        FakeAssembly::default()
            .with("unit", TestCase::method(&format!("{name}.Math"), "Adds"), Behaviour::Pass)
            .with("unit", TestCase::method(&format!("{name}.Math"), "Subtracts"), Behaviour::Pass),
    )
}

fn assembly(name: &str, assembly: FakeAssembly) -> TestAssemblyInfo<FakeAssembly> {
    TestAssemblyInfo::new(format!("/bin/{name}.json"), assembly)
}

fn tree_names(output: &RunOutput) -> Vec<String> {
    output
        .tree
        .assemblies
        .iter()
        .map(|a| a.name.clone())
        .collect()
}

#[test]
fn test_runs_every_assembly_in_order() {
    let (runner, log) = runner(sequential());
    let output = runner.run(&[healthy("A"), healthy("B")]);

    assert_eq!(tree_names(&output), vec!["/bin/A.json", "/bin/B.json"]);
    assert_eq!(output.summary.total, 4);
    assert_eq!(output.summary.passed, 4);
    assert_eq!(output.summary.errors, 0);
    assert_eq!(output.tree.assemblies[0].test_framework, "fake");
    let info = log.info.lock();
    assert_eq!(info[0], "Running tests for A");
    assert_eq!(info[1], "Running tests for B");
}

#[test]
fn test_discovery_error_is_isolated_to_its_assembly() {
    let (runner, log) = runner(sequential());
    let broken = assembly(
        "Broken",
        FakeAssembly {
            broken_discovery: true,
            ..FakeAssembly::default()
        },
    );

    let output = runner.run(&[healthy("A"), broken, healthy("C")]);

    assert_eq!(tree_names(&output), vec!["/bin/A.json", "/bin/C.json"]);
    assert_eq!(output.summary.passed, 4);
    assert_eq!(output.summary.errors, 1);
    assert_eq!(
        *log.errors.lock(),
        vec!["Failed to run assembly '/bin/Broken.json': discovery failed: cannot enumerate"
            .to_string()]
    );
    assert_eq!(output.summary.exit_code(), 1);
}

#[test]
fn test_panicking_case_discards_partial_assembly() {
    for parallel in [false, true] {
        let (runner, log) = runner(RunnerConfig {
            parallel,
            ..RunnerConfig::default()
        });
        let panicking = assembly(
            "Panics",
            FakeAssembly::default()
                .with("unit", TestCase::method("P.Math", "Adds"), Behaviour::Pass)
                .with("unit", TestCase::method("P.Math", "Explodes"), Behaviour::Panic)
                .with("unit", TestCase::method("P.Math", "Never"), Behaviour::Pass),
        );

        let output = runner.run(&[healthy("A"), panicking, healthy("C")]);

        assert_eq!(tree_names(&output), vec!["/bin/A.json", "/bin/C.json"]);
        assert_eq!(output.summary.total, 4, "parallel = {parallel}");
        assert_eq!(output.summary.errors, 1);
        let errors = log.errors.lock();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to run assembly '/bin/Panics.json': panicked"));
        assert!(errors[0].contains("case blew up"));
    }
}

#[test]
fn test_execution_error_aborts_assembly() {
    let (runner, _log) = runner(sequential());
    let breaking = assembly(
        "Breaks",
        FakeAssembly::default()
            .with("unit", TestCase::method("B.Io", "Reads"), Behaviour::Pass)
            .with("unit", TestCase::method("B.Io", "Crashes"), Behaviour::Break),
    );

    let output = runner.run(&[breaking, healthy("C")]);

    assert_eq!(tree_names(&output), vec!["/bin/C.json"]);
    assert_eq!(output.summary.errors, 1);
}

#[test]
fn test_excluded_assembly_is_never_discovered() {
    let mut filters = FilterCollection::new();
    filters.add(
        Filter::by_class_name("Skip.Math", true)
            .unwrap()
            .with_assembly("Skip"),
    );
    let (runner, log) = runner(RunnerConfig {
        filters,
        ..sequential()
    });

    let output = runner.run(&[healthy("Skip"), healthy("Keep")]);

    assert_eq!(tree_names(&output), vec!["/bin/Keep.json"]);
    assert_eq!(output.summary.filtered_assemblies, 1);
    assert_eq!(*runner.framework().discovered.lock(), vec!["Keep".to_string()]);
    assert_eq!(log.info.lock()[0], "Excluded: '/bin/Skip.json' due to filter");
}

#[test]
fn test_filtered_cases_are_counted_not_executed() {
    let mut filters = FilterCollection::new();
    filters.add(Filter::by_trait("Category", Some("slow"), true).unwrap());
    let (runner, log) = runner(RunnerConfig {
        filters,
        ..sequential()
    });
    let mixed = assembly(
        "Mixed",
        FakeAssembly::default()
            .with("unit", TestCase::method("M.T", "Fast"), Behaviour::Pass)
            .with(
                "unit",
                TestCase::method("M.T", "Slow").with_trait("Category", ["Slow"]),
                Behaviour::Pass,
            )
            .with("unit", TestCase::method("M.T", "Skipped"), Behaviour::Skip),
    );

    let output = runner.run(&[mixed]);

    assert_eq!(
        *runner.framework().executed.lock(),
        vec!["M.T.Fast".to_string(), "M.T.Skipped".to_string()]
    );
    let summary = &output.summary;
    assert_eq!(summary.filtered, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(output.tree.counts().total, 2);
    let expected = "[FILTER] Excluded test 'M.T.Slow' due to trait filter 'Category=slow'.";
    assert!(log.traces.lock().iter().any(|line| line == expected));
}

#[test]
fn test_results_grouped_by_collection() {
    let (runner, _log) = runner(sequential());
    let grouped = assembly(
        "Grouped",
        FakeAssembly::default()
            .with("fast", TestCase::method("G.T", "One"), Behaviour::Pass)
            .with("slow", TestCase::method("G.T", "Two"), Behaviour::Pass)
            .with("fast", TestCase::method("G.T", "Three"), Behaviour::Pass),
    );

    let output = runner.run(&[grouped]);

    let collections: Vec<_> = output.tree.assemblies[0]
        .collections
        .iter()
        .map(|c| (c.name.as_str(), c.tests.len()))
        .collect();
    assert_eq!(collections, vec![("fast", 2), ("slow", 1)]);
    let first = &output.tree.assemblies[0].collections[0].tests[0];
    assert_eq!(first.type_name, "G.T");
    assert_eq!(first.method, "One");
}

#[test]
fn test_parallel_keeps_discovery_order() {
    let mut cases = FakeAssembly::default();
    for i in 0..32 {
        let behaviour = if i % 5 == 0 {
            Behaviour::Fail("bad")
        } else {
            Behaviour::Pass
        };
        cases = cases.with("unit", TestCase::method("Par.T", &format!("Case{i:02}")), behaviour);
    }
    let (runner, _log) = runner(RunnerConfig {
        max_parallel: Some(4),
        ..RunnerConfig::default()
    });

    let output = runner.run(&[assembly("Par", cases)]);

    let names: Vec<_> = output.tree.assemblies[0]
        .tests()
        .map(|t| t.method.clone())
        .collect();
    let expected: Vec<_> = (0..32).map(|i| format!("Case{i:02}")).collect();
    assert_eq!(names, expected);
    assert_eq!(output.summary.failed, 7);
    assert_eq!(output.failures.len(), 7);
    assert_eq!(output.failures[0].test, "Par.T.Case00");
}

#[test]
fn test_failure_summary_logged_at_end() {
    let (runner, log) = runner(RunnerConfig {
        verbose: true,
        ..sequential()
    });
    let failing = assembly(
        "Fails",
        FakeAssembly::default()
            .with("unit", TestCase::method("F.T", "Ok"), Behaviour::Pass)
            .with("unit", TestCase::method("F.T", "Bad"), Behaviour::Fail("expected 1\ngot 2")),
    );

    let output = runner.run(&[failing]);

    assert_eq!(
        output.failures,
        vec![FailureInfo {
            assembly: "Fails".into(),
            test: "F.T.Bad".into(),
            message: "expected 1\ngot 2".into(),
        }]
    );
    let info = log.info.lock();
    let tail: Vec<_> = info.iter().rev().take(4).rev().cloned().collect();
    assert_eq!(
        tail,
        vec![
            "Failed tests:".to_string(),
            "1) [FAIL] Fails: F.T.Bad".to_string(),
            "     expected 1".to_string(),
            "     got 2".to_string(),
        ]
    );
    assert!(info.iter().any(|line| line.starts_with("\t[PASS] F.T.Ok")));
    assert_eq!(*log.errors.lock(), vec!["\t[FAIL] F.T.Bad: expected 1\ngot 2".to_string()]);
}

#[test]
fn test_each_run_starts_fresh() {
    let (runner, _log) = runner(sequential());
    let first = runner.run(&[healthy("A")]);
    let second = runner.run(&[healthy("A")]);

    assert_eq!(first.summary.total, 2);
    assert_eq!(second.summary.total, 2);
    assert_eq!(second.tree.assemblies.len(), 1);
}

#[test]
fn test_all_cases_filtered_is_nothing_ran() {
    let mut filters = FilterCollection::new();
    filters.add(Filter::by_class_name("Nope", false).unwrap());
    let (runner, _log) = runner(RunnerConfig {
        filters,
        ..sequential()
    });

    let output = runner.run(&[healthy("A")]);

    assert_eq!(output.summary.executed(), 0);
    assert_eq!(output.summary.filtered, 2);
    assert_eq!(output.summary.total, 2);
    assert_eq!(output.summary.exit_code(), 2);
}

#[test]
fn test_empty_run_exit_code() {
    let (runner, _log) = runner(RunnerConfig::default());
    let output = runner.run(&[]);

    assert_eq!(output.summary, crate::ExecutionSummary {
        time: output.summary.time,
        ..Default::default()
    });
    assert_eq!(output.summary.exit_code(), 2);
}
