//! Domain layer error definitions.

use thiserror::Error;

/// Errors surfaced by a [`super::DocumentStore`] implementation.
///
/// The store deliberately collapses remote failure kinds: a not-found, a
/// permission denial, and a network fault all arrive as [`Transport`] with
/// only the underlying message. Callers cannot branch on the cause; this is
/// a known limitation of the layer, not an invitation to parse messages.
///
/// [`Transport`]: StoreError::Transport
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The remote call failed (connection error or non-2xx status).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote call succeeded but the response body was not the expected
    /// shape.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}
