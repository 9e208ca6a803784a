//! Filter engine for the xtr test runner.
//!
//! Decides, for every discovered test case and every test assembly, whether
//! it takes part in a run. A run is configured with an ordered
//! [`FilterCollection`] of [`Filter`] rules:
//!
//! - `exclude = true` rules act as deny-lists: a match removes the entity.
//! - `exclude = false` rules act as allow-lists: anything that does *not*
//!   match is removed.
//!
//! Missing data (no class name, no traits, ...) always counts as "not
//! matched", so it resolves to the non-matching outcome of the rule.
//!
//! ```text
//! FilterCollection
//!     │  first rule reporting exclusion wins
//!     ▼
//! Filter::evaluate_test(&TestCase) ──► Verdict { excluded, message }
//! ```

mod case;
mod collection;
mod error;
mod filter;
mod log;

pub use case::{TestAssemblyInfo, TestCase, Traits};
pub use collection::FilterCollection;
pub use error::FilterError;
pub use filter::{Filter, FilterKind, Verdict};
pub use log::{LogSink, NullLog};
