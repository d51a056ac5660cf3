//! UseCase: paginated message history retrieval.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{DocumentStore, StructuredQuery};

use super::error::ChatError;
use super::{CHAT_ROOMS_COLLECTION, MESSAGES_SUBCOLLECTION, decode_stored};

/// Default page size when the caller does not specify one.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 50;

/// Reads a room's message history, newest page first, returned in
/// chronological order.
pub struct GetMessagesUseCase {
    store: Arc<dyn DocumentStore>,
}

impl GetMessagesUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch up to `limit` messages from a room, optionally starting strictly
    /// after the message id `start_after` (older-page pagination).
    ///
    /// The query runs descending on `timestamp` so `limit` keeps the most
    /// recent messages; the result is then reversed so callers receive
    /// ascending, chronological order. That reversal is what the chat UI
    /// relies on; do not remove it.
    pub async fn execute(
        &self,
        room_id: &str,
        limit: u32,
        start_after: Option<&str>,
    ) -> Result<Vec<Map<String, Value>>, ChatError> {
        let parent = format!("{CHAT_ROOMS_COLLECTION}/{room_id}/{MESSAGES_SUBCOLLECTION}");

        let mut query = StructuredQuery::collection(MESSAGES_SUBCOLLECTION)
            .descending("timestamp")
            .with_limit(limit);
        if let Some(cursor) = start_after {
            query = query.starting_after(format!("{parent}/{cursor}"));
        }

        let results = self
            .store
            .run_query(&parent, query)
            .await
            .map_err(ChatError::store("get chat messages"))?;

        let mut messages: Vec<Map<String, Value>> = results.iter().map(decode_stored).collect();
        messages.reverse();
        Ok(messages)
    }
}
