//! A single inclusion/exclusion rule.

use std::fmt;

use crate::case::{TestAssemblyInfo, TestCase};
use crate::error::FilterError;

/// What a [`Filter`] selects on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// A single test method, by method name.
    Single,
    /// A test class, by dot-qualified class name.
    Class,
    /// Classes whose name, minus its last dot segment, is the namespace.
    Namespace,
    /// A trait name, optionally with a value.
    Trait,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Single => "single",
            FilterKind::Class => "class",
            FilterKind::Namespace => "namespace",
            FilterKind::Trait => "trait",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one filter against one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub excluded: bool,
    /// Trace line describing the decision.
    pub message: String,
}

/// One filter rule.
///
/// A rule whose condition holds yields `exclude`; a rule whose condition
/// does not hold (including when the data to check is missing) yields
/// `!exclude`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    kind: FilterKind,
    selector_name: String,
    selector_value: Option<String>,
    assembly_name: Option<String>,
    exclude: bool,
}

impl Filter {
    /// Select a test by its method name.
    pub fn by_test_name(name: &str, exclude: bool) -> Result<Self, FilterError> {
        Self::new(FilterKind::Single, "name", name, None, exclude)
    }

    /// Select all tests of a dot-qualified class.
    pub fn by_class_name(class_name: &str, exclude: bool) -> Result<Self, FilterError> {
        Self::new(FilterKind::Class, "class_name", class_name, None, exclude)
    }

    /// Select all tests whose class lives directly in `namespace`.
    pub fn by_namespace(namespace: &str, exclude: bool) -> Result<Self, FilterError> {
        Self::new(FilterKind::Namespace, "namespace", namespace, None, exclude)
    }

    /// Select tests by trait. Without a value, only the trait name is matched.
    pub fn by_trait(
        trait_name: &str,
        trait_value: Option<&str>,
        exclude: bool,
    ) -> Result<Self, FilterError> {
        Self::new(
            FilterKind::Trait,
            "trait_name",
            trait_name,
            trait_value.filter(|v| !v.is_empty()).map(str::to_string),
            exclude,
        )
    }

    fn new(
        kind: FilterKind,
        param: &'static str,
        selector_name: &str,
        selector_value: Option<String>,
        exclude: bool,
    ) -> Result<Self, FilterError> {
        if selector_name.is_empty() {
            return Err(FilterError::InvalidArgument { param });
        }
        Ok(Filter {
            kind,
            selector_name: selector_name.to_string(),
            selector_value,
            assembly_name: None,
            exclude,
        })
    }

    /// Also gate whole assemblies whose bare name is `assembly_name`.
    ///
    /// An empty name leaves the filter unscoped.
    #[must_use]
    pub fn with_assembly(mut self, assembly_name: &str) -> Self {
        self.assembly_name = Some(assembly_name)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn selector_name(&self) -> &str {
        &self.selector_name
    }

    pub fn selector_value(&self) -> Option<&str> {
        self.selector_value.as_deref()
    }

    pub fn assembly_name(&self) -> Option<&str> {
        self.assembly_name.as_deref()
    }

    pub fn exclude(&self) -> bool {
        self.exclude
    }

    /// Decide whether `case` is excluded by this rule.
    pub fn evaluate_test(&self, case: &TestCase) -> Verdict {
        let matched = match self.kind {
            FilterKind::Single => self.matches_method(case),
            FilterKind::Class => self.matches_class(case),
            FilterKind::Namespace => self.matches_namespace(case),
            FilterKind::Trait => self.matches_trait(case),
        };
        let excluded = if matched { self.exclude } else { !self.exclude };
        Verdict {
            excluded,
            message: format!(
                "[FILTER] {} test '{}' due to {} filter '{}'.",
                if excluded { "Excluded" } else { "Included" },
                case.display_name,
                self.kind,
                self.selector(),
            ),
        }
    }

    /// Decide whether an assembly is excluded by this rule.
    ///
    /// Returns `None` when the filter is not scoped to an assembly: such a
    /// filter has no say at assembly granularity.
    pub fn evaluate_assembly<A>(&self, assembly: &TestAssemblyInfo<A>) -> Option<Verdict> {
        let wanted = self.assembly_name.as_deref()?;
        let matched = assembly.bare_name() == wanted;
        let excluded = if matched { self.exclude } else { !self.exclude };
        let decision = if excluded { "Excluded" } else { "Included" };
        let path = assembly.full_path.display();
        let message = if matched {
            format!("{decision} '{path}' due to filter")
        } else {
            format!("{decision} '{path}': does not match filter assembly '{wanted}'")
        };
        Some(Verdict { excluded, message })
    }

    fn matches_method(&self, case: &TestCase) -> bool {
        case.method_name
            .as_deref()
            .is_some_and(|name| name == self.selector_name)
    }

    fn matches_class(&self, case: &TestCase) -> bool {
        case.class_name
            .as_deref()
            .is_some_and(|name| name == self.selector_name)
    }

    fn matches_namespace(&self, case: &TestCase) -> bool {
        case.namespace()
            .is_some_and(|namespace| namespace == self.selector_name)
    }

    fn matches_trait(&self, case: &TestCase) -> bool {
        let Some(values) = case.traits.get(&self.selector_name) else {
            return false;
        };
        match self.selector_value.as_deref() {
            // Name-only filters match a trait that carries no values.
            None => values.is_empty() || values.iter().any(String::is_empty),
            Some(wanted) => values.iter().any(|value| eq_ignore_case(value, wanted)),
        }
    }

    fn selector(&self) -> String {
        match self.kind {
            FilterKind::Trait => format!(
                "{}={}",
                self.selector_name,
                self.selector_value.as_deref().unwrap_or_default()
            ),
            _ => self.selector_name.clone(),
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
