//! Filter construction errors.

/// Error raised while building a [`Filter`](crate::Filter).
///
/// Only construction can fail. Evaluating a filter never does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A required selector string was empty.
    #[error("`{param}` must not be empty")]
    InvalidArgument { param: &'static str },
}
