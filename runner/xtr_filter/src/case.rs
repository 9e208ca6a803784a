//! Entities the filters are evaluated against.
//!
//! Both shapes are supplied by the test framework collaborator. The filter
//! engine only reads them.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Trait name to trait values. A name may map to an empty list.
pub type Traits = FxHashMap<String, Vec<String>>;

/// A discovered test case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestCase {
    /// Human-readable name used in logs and reports.
    pub display_name: String,
    /// Dot-qualified owning class, e.g. `My.Name.Space.FooTests`.
    pub class_name: Option<String>,
    /// Test method name, without the class prefix.
    pub method_name: Option<String>,
    pub traits: Traits,
}

impl TestCase {
    pub fn new(display_name: impl Into<String>) -> Self {
        TestCase {
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    /// Create a case for `class_name.method_name`, displayed by its full name.
    pub fn method(class_name: &str, method_name: &str) -> Self {
        TestCase {
            display_name: format!("{class_name}.{method_name}"),
            class_name: Some(class_name.to_string()),
            method_name: Some(method_name.to_string()),
            traits: Traits::default(),
        }
    }

    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = Some(method_name.into());
        self
    }

    /// Attach a trait. Values accumulate if the trait is added twice.
    #[must_use]
    pub fn with_trait<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// The class name with its last dot segment removed.
    ///
    /// Returns `None` when there is no class name or it contains no `.`.
    pub fn namespace(&self) -> Option<&str> {
        self.class_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(namespace, _)| namespace)
    }
}

/// A test assembly handed to the runner: its path and a loaded handle.
#[derive(Clone, Debug)]
pub struct TestAssemblyInfo<A = ()> {
    pub full_path: PathBuf,
    pub assembly: A,
}

impl<A> TestAssemblyInfo<A> {
    pub fn new(full_path: impl Into<PathBuf>, assembly: A) -> Self {
        TestAssemblyInfo {
            full_path: full_path.into(),
            assembly,
        }
    }

    /// File name without its extension: `/bin/Foo.Tests.dll` gives `Foo.Tests`.
    pub fn bare_name(&self) -> &str {
        bare_name(&self.full_path)
    }
}

impl TestAssemblyInfo<()> {
    /// Assembly info without a loaded handle, for path-only checks.
    pub fn from_path(full_path: impl Into<PathBuf>) -> Self {
        TestAssemblyInfo::new(full_path, ())
    }
}

fn bare_name(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
}
