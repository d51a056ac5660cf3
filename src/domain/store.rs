//! Document-store port.
//!
//! Use cases depend on this trait and receive a concrete implementation by
//! injection (`Arc<dyn DocumentStore>`); the production implementation is
//! [`crate::infrastructure::FirestoreRestStore`]. Unit tests mock it.

use async_trait::async_trait;

use super::document::Document;
use super::error::StoreError;
use super::query::StructuredQuery;

/// A document as stored remotely: its full resource name plus its decoded
/// field map.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Full resource name, e.g.
    /// `projects/{p}/databases/(default)/documents/chat_rooms/{id}`.
    pub name: String,
    /// Decoded field map.
    pub document: Document,
}

impl StoredDocument {
    /// The document id: the last segment of the resource name.
    ///
    /// This is the only place the environment-specific resource path leaks
    /// into decoded data; callers attach the result as an `id` field.
    pub fn document_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or("")
    }
}

/// Request-scoped CRUD plus structured queries against a document store.
///
/// All paths are relative to the database root (`chat_rooms/{room}`,
/// `chat_rooms/{room}/messages`). No method retries; a failed call is the
/// caller's problem to surface or to swallow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document under the `parent` collection path. An empty
    /// `document_id` delegates id generation to the remote store.
    async fn create_document(
        &self,
        parent: &str,
        document_id: &str,
        document: Document,
    ) -> Result<StoredDocument, StoreError>;

    /// Fetch a single document by path.
    async fn get_document(&self, path: &str) -> Result<StoredDocument, StoreError>;

    /// Update the given fields of the document at `path`. Fields not present
    /// in `document` are left untouched.
    async fn patch_document(
        &self,
        path: &str,
        document: Document,
    ) -> Result<StoredDocument, StoreError>;

    /// Run a structured query under the `parent` path and return the matching
    /// documents.
    async fn run_query(
        &self,
        parent: &str,
        query: StructuredQuery,
    ) -> Result<Vec<StoredDocument>, StoreError>;
}
