//! UseCase: chat room creation.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::common::time::utc_now_rfc3339;
use crate::domain::{Document, DocumentIdFactory, DocumentStore, TypedValue};

use super::error::ChatError;
use super::{CHAT_ROOMS_COLLECTION, decode_stored};

/// Creates a chat room document under `chat_rooms`.
pub struct CreateRoomUseCase {
    store: Arc<dyn DocumentStore>,
}

impl CreateRoomUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a room from a caller payload (name, description, created_by,
    /// participants, type, ...).
    ///
    /// A missing `room_id` is filled with a generated UUID; an explicitly
    /// empty one is passed through so the remote store assigns the id.
    /// `created_at` and `updated_at` are injected as the current time,
    /// replacing any caller-supplied values.
    ///
    /// Returns the stored room as a plain map with its `id` attached.
    pub async fn execute(
        &self,
        mut room: Map<String, Value>,
    ) -> Result<Map<String, Value>, ChatError> {
        let room_id = match room.get("room_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => DocumentIdFactory::generate(),
        };
        room.insert("room_id".to_string(), Value::String(room_id.clone()));

        let mut document = Document::from_json(&room);
        let now = utc_now_rfc3339();
        document.insert("created_at", TypedValue::Timestamp(now.clone()));
        document.insert("updated_at", TypedValue::Timestamp(now));

        let stored = self
            .store
            .create_document(CHAT_ROOMS_COLLECTION, &room_id, document)
            .await
            .map_err(ChatError::store("create chat room"))?;

        Ok(decode_stored(&stored))
    }
}
