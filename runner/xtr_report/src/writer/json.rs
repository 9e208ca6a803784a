//! JSON dump of the neutral tree.

use std::io;

use crate::tree::ResultsTree;
use crate::writer::{ReportError, ReportWriter};

/// Pretty-printed JSON of the whole tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonWriter;

impl ReportWriter for JsonWriter {
    fn write(&self, tree: &ResultsTree, out: &mut dyn io::Write) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *out, tree)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
