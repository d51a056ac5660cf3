//! Use-case layer error definitions.

use thiserror::Error;

use crate::domain::StoreError;

/// Failure of a chat operation.
///
/// Every remote failure is wrapped with the operation name and the
/// underlying store error message. The layer does not distinguish error
/// kinds (not-found vs. network vs. permission), so callers cannot branch
/// on the cause programmatically, a documented limitation inherited from
/// the store port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("{operation} failed: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ChatError {
    /// Build the mapper used on every store call: `.map_err(ChatError::store("join room"))`.
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { operation, source }
    }
}
