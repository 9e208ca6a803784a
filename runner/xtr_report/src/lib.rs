//! Results emitter for the xtr test runner.
//!
//! A run produces one [`ResultsTree`]. Writers turn it into documents:
//!
//! - [`Dialect::Xunit`] (and [`Dialect::Unspecified`]): the tree itself as
//!   `<assemblies>` XML
//! - [`Dialect::NUnitV2`], [`Dialect::NUnitV3`]: transforms registered in
//!   [`Writers`]
//! - [`JsonWriter`]: serde dump of the tree, for tooling

mod dialect;
mod id;
mod tree;
mod writer;
mod xml;

pub use dialect::{Dialect, UnknownDialect};
pub use id::IdGenerator;
pub use tree::{
    environment, AssemblyNode, CollectionNode, Counts, Outcome, ResultsTree, TestNode,
};
pub use writer::{
    JsonWriter, NUnitV2Writer, NUnitV3Writer, ReportError, ReportWriter, Writers, XunitWriter,
};
