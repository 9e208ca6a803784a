//! Ordered set of filters evaluated with "first exclusion wins".

use crate::case::{TestAssemblyInfo, TestCase};
use crate::filter::Filter;
use crate::log::LogSink;

/// The filters of one run, in evaluation order.
///
/// An empty collection filters nothing. Otherwise filters are consulted in
/// insertion order and the first one reporting exclusion decides; the rest
/// are not evaluated.
#[derive(Clone, Debug, Default)]
pub struct FilterCollection {
    filters: Vec<Filter>,
}

impl FilterCollection {
    pub fn new() -> Self {
        FilterCollection::default()
    }

    pub fn add(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Whether any filter excludes `case`.
    pub fn is_test_excluded(&self, case: &TestCase, log: &dyn LogSink) -> bool {
        self.filters.iter().any(|filter| {
            let verdict = filter.evaluate_test(case);
            log.trace(&verdict.message);
            verdict.excluded
        })
    }

    /// Whether any assembly-scoped filter excludes `assembly`.
    pub fn is_assembly_excluded<A>(
        &self,
        assembly: &TestAssemblyInfo<A>,
        log: &dyn LogSink,
    ) -> bool {
        self.filters.iter().any(|filter| {
            filter.evaluate_assembly(assembly).is_some_and(|verdict| {
                log.trace(&verdict.message);
                verdict.excluded
            })
        })
    }
}

impl Extend<Filter> for FilterCollection {
    fn extend<I: IntoIterator<Item = Filter>>(&mut self, iter: I) {
        self.filters.extend(iter);
    }
}

impl FromIterator<Filter> for FilterCollection {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        FilterCollection {
            filters: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterCollection {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
