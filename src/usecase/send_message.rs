//! UseCase: message delivery plus the best-effort room activity update.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::common::time::utc_now_rfc3339;
use crate::domain::{Document, DocumentIdFactory, DocumentStore, TypedValue};

use super::error::ChatError;
use super::{CHAT_ROOMS_COLLECTION, MESSAGES_SUBCOLLECTION, decode_stored};

/// Creates a message document under `chat_rooms/{room}/messages` and then
/// refreshes the parent room's `updated_at` / `last_message` summary.
///
/// The summary refresh is best-effort: its failure is logged and swallowed,
/// so the caller observes only the primary write. No retry either way.
pub struct SendMessageUseCase {
    store: Arc<dyn DocumentStore>,
}

impl SendMessageUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Send a message (text, sender_id, sender_name, type) to a room.
    ///
    /// A missing `message_id` is filled with a generated UUID. The message
    /// `timestamp` is server-assigned here, replacing any caller value.
    /// Returns the stored message as a plain map with its `id` attached.
    pub async fn execute(
        &self,
        room_id: &str,
        mut message: Map<String, Value>,
    ) -> Result<Map<String, Value>, ChatError> {
        let message_id = match message.get("message_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => DocumentIdFactory::generate(),
        };
        message.insert("message_id".to_string(), Value::String(message_id.clone()));

        let mut document = Document::from_json(&message);
        document.insert("timestamp", TypedValue::Timestamp(utc_now_rfc3339()));

        let parent = format!("{CHAT_ROOMS_COLLECTION}/{room_id}/{MESSAGES_SUBCOLLECTION}");
        let stored = self
            .store
            .create_document(&parent, &message_id, document.clone())
            .await
            .map_err(ChatError::store("send message"))?;

        // Secondary write; the message above already succeeded and that is
        // all the caller gets to observe.
        self.update_room_activity(room_id, &document).await;

        Ok(decode_stored(&stored))
    }

    /// Patch the parent room's `updated_at` and `last_message` summary.
    async fn update_room_activity(&self, room_id: &str, message: &Document) {
        let mut summary = Document::new();
        for field in ["text", "sender_id", "sender_name"] {
            let text = message
                .get(field)
                .and_then(TypedValue::as_str)
                .unwrap_or_default();
            summary.insert(field, TypedValue::String(text.to_string()));
        }
        let timestamp = match message.get("timestamp") {
            Some(TypedValue::Timestamp(timestamp)) => timestamp.clone(),
            _ => utc_now_rfc3339(),
        };
        summary.insert("timestamp", TypedValue::Timestamp(timestamp));

        let mut update = Document::new();
        update.insert("updated_at", TypedValue::Timestamp(utc_now_rfc3339()));
        update.insert("last_message", TypedValue::Map(summary));

        let path = format!("{CHAT_ROOMS_COLLECTION}/{room_id}");
        if let Err(error) = self.store.patch_document(&path, update).await {
            tracing::warn!(
                room_id,
                %error,
                "room activity update failed after successful message write"
            );
        }
    }
}
