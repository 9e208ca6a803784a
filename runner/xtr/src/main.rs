//! xtr command line.

mod commands;

use commands::run_tests;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "test" => {
            let command = match xtr::parse_test_args(&args[2..]) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("error: {e}");
                    eprintln!();
                    print_test_usage();
                    std::process::exit(1);
                }
            };
            std::process::exit(run_tests(&command));
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("xtr {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("xtr - filtered test-assembly runner");
    println!();
    println!("Usage: xtr <command> [options]");
    println!();
    println!("Commands:");
    println!("  test <manifest.json>...   Run test manifests and write a results file");
    println!("  help                      Show this message");
    println!("  version                   Show version");
    println!();
    print_test_usage();
}

fn print_test_usage() {
    println!("Usage: xtr test <manifest.json>... [options]");
    println!();
    println!("Filters (repeatable, applied in order):");
    println!("  --assembly=<name>         Scope the filters that follow to one assembly");
    println!("                            (an empty name clears the scope)");
    println!("  --method=<name>           Only run methods with this name");
    println!("  --no-method=<name>        Skip methods with this name");
    println!("  --class=<name>            Only run this class");
    println!("  --no-class=<name>         Skip this class");
    println!("  --namespace=<name>        Only run classes in this namespace");
    println!("  --no-namespace=<name>     Skip classes in this namespace");
    println!("  --trait=<name[=value]>    Only run cases with this trait");
    println!("  --no-trait=<name[=value]> Skip cases with this trait");
    println!();
    println!("Output:");
    println!("  --format=<dialect>        xunit (default), nunitv2, nunitv3");
    println!("  -o <dir>, --results-dir=<dir>");
    println!("                            Directory for the results file (default: .)");
    println!(
        "  --results-file=<name>     Results file name (default: {})",
        xtr::DEFAULT_RESULTS_FILE
    );
    println!("  --json=<path>             Also write the results tree as JSON");
    println!();
    println!("Execution:");
    println!("  --no-parallel             Run cases one at a time");
    println!("  --max-parallel=<n>        Cap worker threads per assembly");
    println!("  -v, --verbose             Log every case and filter decision");
}
