//! NUnit v2 `<test-results>` transform.

use std::io;
use std::time::Duration;

use crate::tree::{
    environment, AssemblyNode, CollectionNode, Counts, Outcome, ResultsTree, TestNode,
};
use crate::writer::{ReportError, ReportWriter};
use crate::xml::{seconds, Element};

/// Writes NUnit 2.x result documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct NUnitV2Writer;

impl ReportWriter for NUnitV2Writer {
    fn write(&self, tree: &ResultsTree, out: &mut dyn io::Write) -> Result<(), ReportError> {
        let counts = tree.counts();
        let first = tree.assemblies.first();
        let os_version = first.map_or_else(environment, |a| a.environment.clone());
        let root = Element::new("test-results")
            .attr("name", "Test results")
            .attr("total", counts.total)
            .attr("errors", 0)
            .attr("failures", counts.failed)
            .attr("not-run", counts.skipped)
            .attr("inconclusive", 0)
            .attr("ignored", counts.skipped)
            .attr("skipped", 0)
            .attr("invalid", 0)
            .attr("date", first.map_or("", |a| a.run_date.as_str()))
            .attr("time", first.map_or("", |a| a.run_time.as_str()))
            .child(
                Element::new("environment")
                    .attr("os-version", os_version)
                    .attr("platform", std::env::consts::OS),
            )
            .child(
                Element::new("culture-info")
                    .attr("current-culture", "en-US")
                    .attr("current-uiculture", "en-US"),
            )
            .child(
                suite("Assemblies", "xUnit.net Tests", counts, tree.time())
                    .child(Element::new("results").children(tree.assemblies.iter().map(assembly))),
            );
        root.write_document(out)?;
        Ok(())
    }
}

fn suite(kind: &'static str, name: &str, counts: Counts, time: Duration) -> Element {
    let success = counts.failed == 0;
    Element::new("test-suite")
        .attr("type", kind)
        .attr("name", name)
        .attr("executed", "True")
        .attr("result", if success { "Success" } else { "Failure" })
        .attr("success", if success { "True" } else { "False" })
        .attr("time", seconds(time))
}

fn assembly(node: &AssemblyNode) -> Element {
    suite("Assembly", &node.name, node.counts(), node.time())
        .child(Element::new("results").children(node.collections.iter().map(collection)))
}

fn collection(node: &CollectionNode) -> Element {
    suite("TestCollection", &node.name, node.counts(), node.time())
        .child(Element::new("results").children(node.tests.iter().map(test_case)))
}

fn test_case(node: &TestNode) -> Element {
    let element = Element::new("test-case").attr("name", &node.name);
    match &node.outcome {
        Outcome::Pass => element
            .attr("executed", "True")
            .attr("result", "Success")
            .attr("success", "True")
            .attr("time", seconds(node.time)),
        Outcome::Fail { message } => element
            .attr("executed", "True")
            .attr("result", "Failure")
            .attr("success", "False")
            .attr("time", seconds(node.time))
            .child(Element::new("failure").child(Element::new("message").text(message))),
        Outcome::Skip { reason } => element
            .attr("executed", "False")
            .attr("result", "Ignored")
            .child(Element::new("reason").child(Element::new("message").text(reason))),
    }
}
