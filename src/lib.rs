//! Firestore-backed chat storage layer for the Krishi platform.
//!
//! This library provides the marshalling layer between plain JSON chat
//! payloads and Firestore's typed wire format, plus the room/message
//! operations built on top of it. It talks to the Firestore REST API
//! directly; authentication, push delivery, and the HTTP routing surface
//! are collaborators that live outside this crate.

pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod usecase;

// Re-export entry points
pub use domain::{Document, DocumentStore, StoredDocument, TypedValue};
pub use infrastructure::{FirestoreConfig, FirestoreRestStore};
pub use usecase::{
    ChatError, CreateRoomUseCase, GetMessagesUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    ListUserRoomsUseCase, SendMessageUseCase,
};
