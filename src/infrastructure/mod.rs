//! Infrastructure layer: the Firestore REST implementation of the
//! document-store port, plus its configuration.

pub mod config;
pub mod firestore;

pub use config::{ConfigError, FirestoreConfig};
pub use firestore::FirestoreRestStore;
