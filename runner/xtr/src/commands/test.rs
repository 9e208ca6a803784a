//! The `test` command: load manifests, run them, write the results file.

use std::sync::Arc;

use xtr::report::Writers;
use xtr::{
    init_tracing, load_manifests, write_results, ExecutionSummary, ManifestFramework, TestCommand,
    TestRunner, TracingLog,
};

/// Run the manifests of `command` and return the process exit code.
pub fn run_tests(command: &TestCommand) -> i32 {
    let config = &command.config;
    init_tracing(config.verbose);

    let log = Arc::new(TracingLog);
    let loaded = load_manifests(&command.manifests, log.as_ref());

    let runner = TestRunner::with_config(ManifestFramework::new(), config.clone(), log.clone());
    let mut output = runner.run(&loaded.assemblies);
    output.summary.errors += loaded.failed;

    let results_path = match write_results(&output.tree, config, &Writers::default(), log.as_ref())
    {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    print_test_summary(&output.summary);
    match results_path {
        Some(path) => println!("  Results written to {}", path.display()),
        None => println!("  No results file written"),
    }

    output.summary.exit_code()
}

/// Print the totals of a run.
fn print_test_summary(summary: &ExecutionSummary) {
    println!();
    println!("Test Summary:");
    println!(
        "  Tests run: {} Passed: {} Failed: {} Skipped: {} Filtered: {}",
        summary.total, summary.passed, summary.failed, summary.skipped, summary.filtered
    );
    if summary.filtered_assemblies > 0 {
        println!("  Assemblies excluded by filters: {}", summary.filtered_assemblies);
    }
    if summary.errors > 0 {
        println!("  Assemblies that failed to run: {}", summary.errors);
    }
    println!("  Completed in {:.2?}", summary.time);

    println!();
    if summary.has_failures() {
        println!("FAILED");
    } else if summary.executed() == 0 {
        println!("NO TESTS RUN");
    } else {
        println!("OK");
    }
}
