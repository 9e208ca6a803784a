//! Neutral results tree.
//!
//! ```text
//! ResultsTree
//!   └─ AssemblyNode      (one per executed assembly)
//!        └─ CollectionNode
//!             └─ TestNode
//! ```
//!
//! Counts and times are derived from the leaves, so a tree can never carry
//! totals that disagree with its tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of a single test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail { message: String },
    Skip { reason: String },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail { .. })
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip { .. })
    }

    /// xUnit spelling of the outcome: `Pass`, `Fail` or `Skip`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "Pass",
            Outcome::Fail { .. } => "Fail",
            Outcome::Skip { .. } => "Skip",
        }
    }
}

/// Pass/fail/skip tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Counts {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail { .. } => self.failed += 1,
            Outcome::Skip { .. } => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: Counts) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// One executed test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNode {
    /// Display name.
    pub name: String,
    /// Qualified class name.
    pub type_name: String,
    pub method: String,
    pub time: Duration,
    pub outcome: Outcome,
}

/// A named group of tests inside an assembly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNode {
    pub name: String,
    pub tests: Vec<TestNode>,
}

impl CollectionNode {
    pub fn new(name: impl Into<String>) -> Self {
        CollectionNode {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for test in &self.tests {
            counts.record(&test.outcome);
        }
        counts
    }

    pub fn time(&self) -> Duration {
        self.tests.iter().map(|t| t.time).sum()
    }
}

/// Results of one assembly plus the metadata of its run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyNode {
    /// Full path of the assembly.
    pub name: String,
    pub test_framework: String,
    /// `YYYY-MM-DD`
    pub run_date: String,
    /// `HH:MM:SS`
    pub run_time: String,
    pub environment: String,
    pub collections: Vec<CollectionNode>,
}

impl AssemblyNode {
    /// Start an assembly node stamped with the current local date and time.
    pub fn new(name: impl Into<String>, test_framework: impl Into<String>) -> Self {
        let now = chrono::Local::now();
        AssemblyNode {
            name: name.into(),
            test_framework: test_framework.into(),
            run_date: now.format("%Y-%m-%d").to_string(),
            run_time: now.format("%H:%M:%S").to_string(),
            environment: environment(),
            collections: Vec::new(),
        }
    }

    /// Collection called `name`, created at the end if missing.
    pub fn collection_mut(&mut self, name: &str) -> &mut CollectionNode {
        let index = match self.collections.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.collections.push(CollectionNode::new(name));
                self.collections.len() - 1
            }
        };
        &mut self.collections[index]
    }

    pub fn push_test(&mut self, collection: &str, test: TestNode) {
        self.collection_mut(collection).tests.push(test);
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for collection in &self.collections {
            counts.merge(collection.counts());
        }
        counts
    }

    pub fn time(&self) -> Duration {
        self.collections.iter().map(CollectionNode::time).sum()
    }

    pub fn tests(&self) -> impl Iterator<Item = &TestNode> {
        self.collections.iter().flat_map(|c| c.tests.iter())
    }
}

/// Root of a run's results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsTree {
    pub assemblies: Vec<AssemblyNode>,
}

impl ResultsTree {
    pub fn new() -> Self {
        ResultsTree::default()
    }

    pub fn push(&mut self, assembly: AssemblyNode) {
        self.assemblies.push(assembly);
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for assembly in &self.assemblies {
            counts.merge(assembly.counts());
        }
        counts
    }

    pub fn time(&self) -> Duration {
        self.assemblies.iter().map(AssemblyNode::time).sum()
    }
}

/// Operating system, architecture and runner version of this process.
pub fn environment() -> String {
    format!(
        "{} {} (xtr {})",
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION")
    )
}
