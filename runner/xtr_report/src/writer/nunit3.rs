//! NUnit v3 `<test-run>` transform.

use std::io;

use crate::id::IdGenerator;
use crate::tree::{AssemblyNode, CollectionNode, Counts, Outcome, ResultsTree, TestNode};
use crate::writer::{ReportError, ReportWriter};
use crate::xml::{seconds, Element};

/// Writes NUnit 3 result documents.
///
/// Every `test-run`, `test-suite` and `test-case` gets a synthetic id from
/// a fresh [`IdGenerator`], in document order.
#[derive(Clone, Copy, Debug, Default)]
pub struct NUnitV3Writer;

impl ReportWriter for NUnitV3Writer {
    fn write(&self, tree: &ResultsTree, out: &mut dyn io::Write) -> Result<(), ReportError> {
        let mut ids = IdGenerator::new();
        let counts = tree.counts();
        let run_id = ids.next_id();
        let start = tree
            .assemblies
            .first()
            .map(|a| format!("{} {}", a.run_date, a.run_time))
            .unwrap_or_default();

        let assemblies: Vec<Element> = tree
            .assemblies
            .iter()
            .map(|a| assembly(a, &mut ids))
            .collect();

        let root = totals(Element::new("test-run").attr("id", run_id), counts)
            .attr("testcasecount", counts.total)
            .attr("result", result(counts))
            .attr("start-time", start)
            .attr("duration", seconds(tree.time()))
            .children(assemblies);
        root.write_document(out)?;
        Ok(())
    }
}

fn result(counts: Counts) -> &'static str {
    if counts.failed > 0 {
        "Failed"
    } else {
        "Passed"
    }
}

fn totals(element: Element, counts: Counts) -> Element {
    element
        .attr("total", counts.total)
        .attr("passed", counts.passed)
        .attr("failed", counts.failed)
        .attr("inconclusive", 0)
        .attr("skipped", counts.skipped)
}

fn assembly(node: &AssemblyNode, ids: &mut IdGenerator) -> Element {
    let counts = node.counts();
    let id = ids.next_id();
    let fixtures: Vec<Element> = node
        .collections
        .iter()
        .map(|c| collection(c, ids))
        .collect();
    let suite = Element::new("test-suite")
        .attr("type", "Assembly")
        .attr("id", id)
        .attr("name", &node.name)
        .attr("fullname", &node.name)
        .attr("testcasecount", counts.total)
        .attr("result", result(counts))
        .attr("duration", seconds(node.time()));
    totals(suite, counts)
        .child(
            Element::new("environment")
                .attr("framework-version", &node.test_framework)
                .attr("os-version", &node.environment),
        )
        .children(fixtures)
}

fn collection(node: &CollectionNode, ids: &mut IdGenerator) -> Element {
    let counts = node.counts();
    let id = ids.next_id();
    let cases: Vec<Element> = node.tests.iter().map(|t| test_case(t, ids)).collect();
    let suite = Element::new("test-suite")
        .attr("type", "TestFixture")
        .attr("id", id)
        .attr("name", &node.name)
        .attr("fullname", &node.name)
        .attr("testcasecount", counts.total)
        .attr("result", result(counts))
        .attr("duration", seconds(node.time()));
    totals(suite, counts).children(cases)
}

fn test_case(node: &TestNode, ids: &mut IdGenerator) -> Element {
    let element = Element::new("test-case")
        .attr("id", ids.next_id())
        .attr("name", &node.method)
        .attr("fullname", &node.name)
        .attr("methodname", &node.method)
        .attr("classname", &node.type_name)
        .attr("duration", seconds(node.time));
    match &node.outcome {
        Outcome::Pass => element.attr("result", "Passed"),
        Outcome::Fail { message } => element
            .attr("result", "Failed")
            .child(Element::new("failure").child(Element::new("message").text(message))),
        Outcome::Skip { reason } => element
            .attr("result", "Skipped")
            .child(Element::new("reason").child(Element::new("message").text(reason))),
    }
}
