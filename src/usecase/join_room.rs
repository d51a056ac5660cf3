//! UseCase: adding a user to a room's participant list.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{DocumentStore, TypedValue};

use super::error::ChatError;
use super::{CHAT_ROOMS_COLLECTION, contains_participant, decode_stored, room_participants};

/// Adds a user to a room via read-modify-write on the `participants` array.
///
/// Idempotent: joining a room the user is already in performs no write and
/// returns the current room state. Not transactional: concurrent join/leave
/// calls against the same room can race, since there is no concurrency token
/// between the read and the patch. Known limitation.
pub struct JoinRoomUseCase {
    store: Arc<dyn DocumentStore>,
}

impl JoinRoomUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Add `user_id` to the room's participants and return the room as a
    /// plain map with its `id` attached.
    pub async fn execute(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<Map<String, Value>, ChatError> {
        let path = format!("{CHAT_ROOMS_COLLECTION}/{room_id}");
        let stored = self
            .store
            .get_document(&path)
            .await
            .map_err(ChatError::store("join room"))?;

        let mut participants = room_participants(&stored);
        if contains_participant(&participants, user_id) {
            return Ok(decode_stored(&stored));
        }
        participants.push(TypedValue::String(user_id.to_string()));

        let mut document = stored.document;
        document.insert("participants", TypedValue::Array(participants));

        let patched = self
            .store
            .patch_document(&path, document)
            .await
            .map_err(ChatError::store("join room"))?;

        Ok(decode_stored(&patched))
    }
}
