//! The seam between the run coordinator and a test framework.

use xtr_filter::{TestAssemblyInfo, TestCase};
use xtr_report::Outcome;

use crate::error::ExecutionError;

/// Result of executing one case. Timing is measured by the coordinator.
pub type CaseOutcome = Outcome;

/// A case found by discovery.
#[derive(Clone, Debug)]
pub struct DiscoveredTest<T> {
    /// Metadata the filters see.
    pub case: TestCase,
    /// Collection the result is grouped under.
    pub collection: String,
    /// Framework-private handle used to execute the case.
    pub test: T,
}

/// Stream of discovered cases for one assembly.
pub type Discovery<'a, T> =
    Box<dyn Iterator<Item = Result<DiscoveredTest<T>, ExecutionError>> + 'a>;

/// A test framework the coordinator can drive.
///
/// Implementations must be shareable across threads: cases of one assembly
/// may execute concurrently.
pub trait TestFramework: Sync {
    /// Loaded assembly handle.
    type Assembly: Sync;
    /// Per-case handle produced by discovery.
    type Test: Send + Sync;

    /// Framework name recorded in the results tree.
    fn name(&self) -> &str;

    /// Enumerate the cases of an assembly.
    fn discover<'a>(
        &'a self,
        assembly: &'a TestAssemblyInfo<Self::Assembly>,
    ) -> Result<Discovery<'a, Self::Test>, ExecutionError>;

    /// Run one case.
    ///
    /// A failing case is `Ok(Outcome::Fail { .. })`. `Err` means the
    /// framework itself broke and aborts the whole assembly.
    fn execute(
        &self,
        assembly: &TestAssemblyInfo<Self::Assembly>,
        test: &DiscoveredTest<Self::Test>,
    ) -> Result<CaseOutcome, ExecutionError>;
}
