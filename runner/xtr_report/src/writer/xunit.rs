//! Native dialect: the neutral tree as xUnit-style XML.

use std::io;

use crate::tree::{AssemblyNode, CollectionNode, Outcome, ResultsTree, TestNode};
use crate::writer::{ReportError, ReportWriter};
use crate::xml::{seconds, Element};

/// Writes `<assemblies>` documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct XunitWriter;

impl ReportWriter for XunitWriter {
    fn write(&self, tree: &ResultsTree, out: &mut dyn io::Write) -> Result<(), ReportError> {
        let root = Element::new("assemblies").children(tree.assemblies.iter().map(assembly));
        root.write_document(out)?;
        Ok(())
    }
}

fn assembly(node: &AssemblyNode) -> Element {
    let counts = node.counts();
    Element::new("assembly")
        .attr("name", &node.name)
        .attr("test-framework", &node.test_framework)
        .attr("run-date", &node.run_date)
        .attr("run-time", &node.run_time)
        .attr("environment", &node.environment)
        .attr("total", counts.total)
        .attr("passed", counts.passed)
        .attr("failed", counts.failed)
        .attr("skipped", counts.skipped)
        .attr("time", seconds(node.time()))
        .attr("errors", 0)
        .children(node.collections.iter().map(collection))
}

fn collection(node: &CollectionNode) -> Element {
    let counts = node.counts();
    Element::new("collection")
        .attr("name", &node.name)
        .attr("total", counts.total)
        .attr("passed", counts.passed)
        .attr("failed", counts.failed)
        .attr("skipped", counts.skipped)
        .attr("time", seconds(node.time()))
        .children(node.tests.iter().map(test))
}

fn test(node: &TestNode) -> Element {
    let element = Element::new("test")
        .attr("name", &node.name)
        .attr("type", &node.type_name)
        .attr("method", &node.method)
        .attr("time", seconds(node.time))
        .attr("result", node.outcome.as_str());
    match &node.outcome {
        Outcome::Pass => element,
        Outcome::Fail { message } => {
            element.child(Element::new("failure").child(Element::new("message").text(message)))
        }
        Outcome::Skip { reason } => element.child(Element::new("reason").text(reason)),
    }
}
