//! UseCase: removing a user from a room's participant list.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{DocumentStore, TypedValue};

use super::error::ChatError;
use super::{CHAT_ROOMS_COLLECTION, contains_participant, decode_stored, room_participants};

/// Removes a user via read-modify-write on the `participants` array.
///
/// Idempotent: leaving a room the user is not in performs no write and
/// returns the current room state. Shares the non-transactional caveat of
/// [`super::JoinRoomUseCase`].
pub struct LeaveRoomUseCase {
    store: Arc<dyn DocumentStore>,
}

impl LeaveRoomUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Remove `user_id` from the room's participants and return the room as
    /// a plain map with its `id` attached.
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
            .map_err(ChatError::store("leave room"))?;

        let mut participants = room_participants(&stored);
        if !contains_participant(&participants, user_id) {
            return Ok(decode_stored(&stored));
        }
        participants.retain(|value| value.as_str() != Some(user_id));

        let mut document = stored.document;
        document.insert("participants", TypedValue::Array(participants));

        let patched = self
            .store
            .patch_document(&path, document)
            .await
            .map_err(ChatError::store("leave room"))?;

        Ok(decode_stored(&patched))
    }
}
