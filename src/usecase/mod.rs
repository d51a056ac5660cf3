//! Use-case layer: one struct per chat operation.
//!
//! Each use case holds an injected `Arc<dyn DocumentStore>` and translates
//! between the plain JSON maps callers work with and the documents the store
//! port deals in. Inputs and outputs are plain nested maps; decoded results
//! always carry an `id` field taken from the stored document's resource name.

pub mod create_room;
pub mod error;
pub mod get_messages;
pub mod join_room;
pub mod leave_room;
pub mod list_rooms;
pub mod send_message;

pub use create_room::CreateRoomUseCase;
pub use error::ChatError;
pub use get_messages::{DEFAULT_MESSAGE_LIMIT, GetMessagesUseCase};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_rooms::ListUserRoomsUseCase;
pub use send_message::SendMessageUseCase;

use serde_json::{Map, Value};

use crate::domain::{StoredDocument, TypedValue};

/// Root collection holding chat rooms.
pub(crate) const CHAT_ROOMS_COLLECTION: &str = "chat_rooms";

/// Per-room subcollection holding messages.
pub(crate) const MESSAGES_SUBCOLLECTION: &str = "messages";

/// Decode a stored document into the plain map handed to callers, with the
/// document id attached.
pub(crate) fn decode_stored(stored: &StoredDocument) -> Map<String, Value> {
    let mut map = stored.document.to_json();
    map.insert(
        "id".to_string(),
        Value::String(stored.document_id().to_string()),
    );
    map
}

/// The `participants` array of a room document, or empty when absent or not
/// an array.
pub(crate) fn room_participants(stored: &StoredDocument) -> Vec<TypedValue> {
    match stored.document.get("participants") {
        Some(TypedValue::Array(values)) => values.clone(),
        _ => Vec::new(),
    }
}

/// Whether `user_id` appears in a participants array.
pub(crate) fn contains_participant(participants: &[TypedValue], user_id: &str) -> bool {
    participants
        .iter()
        .any(|value| value.as_str() == Some(user_id))
}
