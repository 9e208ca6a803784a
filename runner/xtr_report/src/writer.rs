//! Report writers and the dialect registry.
//!
//! The native dialect serializes the tree directly. Alternate dialects are
//! transforms looked up in [`Writers`]; a missing or failing transform is
//! logged and produces no output instead of a partial document.

mod json;
mod nunit2;
mod nunit3;
mod xunit;

use std::io;

use rustc_hash::FxHashMap;
use xtr_filter::LogSink;

use crate::dialect::Dialect;
use crate::tree::ResultsTree;

pub use json::JsonWriter;
pub use nunit2::NUnitV2Writer;
pub use nunit3::NUnitV3Writer;
pub use xunit::XunitWriter;

/// Errors produced while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write XML report: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("cannot produce {dialect} report: {reason}")]
    Transform { dialect: Dialect, reason: String },
}

/// Serializes a results tree into one document format.
pub trait ReportWriter: Send + Sync {
    fn write(&self, tree: &ResultsTree, out: &mut dyn io::Write) -> Result<(), ReportError>;

    /// Render to an in-memory document.
    fn render(&self, tree: &ResultsTree) -> Result<Vec<u8>, ReportError> {
        let mut buf = Vec::new();
        self.write(tree, &mut buf)?;
        Ok(buf)
    }
}

/// Writers for the alternate dialects, keyed by dialect.
pub struct Writers {
    transforms: FxHashMap<Dialect, Box<dyn ReportWriter>>,
}

impl Writers {
    /// Registry with no alternate dialects.
    pub fn empty() -> Self {
        Writers {
            transforms: FxHashMap::default(),
        }
    }

    /// Register (or replace) the transform for an alternate dialect.
    pub fn register(&mut self, dialect: Dialect, writer: Box<dyn ReportWriter>) {
        self.transforms.insert(dialect.resolve(), writer);
    }

    pub fn remove(&mut self, dialect: Dialect) -> Option<Box<dyn ReportWriter>> {
        self.transforms.remove(&dialect.resolve())
    }

    pub fn supports(&self, dialect: Dialect) -> bool {
        dialect.is_native() || self.transforms.contains_key(&dialect.resolve())
    }

    /// Write `tree` in `dialect`.
    ///
    /// Native output goes straight to `out`. Alternate dialects are rendered
    /// to a buffer first; if the transform is missing or fails, the error is
    /// logged, nothing is written and `Ok(false)` is returned. I/O errors on
    /// `out` are returned as errors.
    pub fn write_report(
        &self,
        tree: &ResultsTree,
        dialect: Dialect,
        out: &mut dyn io::Write,
        log: &dyn LogSink,
    ) -> Result<bool, ReportError> {
        let dialect = dialect.resolve();
        if dialect.is_native() {
            XunitWriter.write(tree, out)?;
            return Ok(true);
        }

        let rendered = self
            .transforms
            .get(&dialect)
            .ok_or_else(|| ReportError::Transform {
                dialect,
                reason: "no transform registered".to_string(),
            })
            .and_then(|writer| writer.render(tree));

        match rendered {
            Ok(document) => {
                out.write_all(&document)?;
                Ok(true)
            }
            Err(e) => {
                tracing::debug!(%dialect, "report transform failed");
                log.error(&e.to_string());
                Ok(false)
            }
        }
    }
}

impl Default for Writers {
    /// Registry holding the NUnit v2 and v3 transforms.
    fn default() -> Self {
        let mut writers = Writers::empty();
        writers.register(Dialect::NUnitV2, Box::new(NUnitV2Writer));
        writers.register(Dialect::NUnitV3, Box::new(NUnitV3Writer));
        writers
    }
}
