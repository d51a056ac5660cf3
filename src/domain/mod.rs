//! Domain layer: the typed-value/document codec and the document-store port.
//!
//! Everything here is storage-neutral. The Firestore REST specifics
//! (URLs, auth environment, resource names) live in the infrastructure
//! layer behind the [`DocumentStore`] trait.

pub mod document;
pub mod error;
pub mod factory;
pub mod query;
pub mod store;
pub mod value;

pub use document::Document;
pub use error::StoreError;
pub use factory::DocumentIdFactory;
pub use query::{Condition, ConditionOp, Direction, Filter, OrderBy, StructuredQuery};
pub use store::{DocumentStore, StoredDocument};
pub use value::TypedValue;

#[cfg(test)]
pub use store::MockDocumentStore;
