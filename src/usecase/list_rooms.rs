//! UseCase: listing the rooms a user belongs to.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{Condition, DocumentStore, StructuredQuery, TypedValue};

use super::error::ChatError;
use super::{CHAT_ROOMS_COLLECTION, decode_stored};

/// Finds every room the user either created or participates in.
pub struct ListUserRoomsUseCase {
    store: Arc<dyn DocumentStore>,
}

impl ListUserRoomsUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Query `chat_rooms` with an OR filter: `created_by == user_id` or
    /// `participants` array-contains `user_id`. Returns decoded rooms with
    /// their `id` attached, in store order.
    pub async fn execute(&self, user_id: &str) -> Result<Vec<Map<String, Value>>, ChatError> {
        let query = StructuredQuery::collection(CHAT_ROOMS_COLLECTION).matching_any(vec![
            Condition::equal("created_by", TypedValue::String(user_id.to_string())),
            Condition::array_contains("participants", TypedValue::String(user_id.to_string())),
        ]);

        let results = self
            .store
            .run_query(CHAT_ROOMS_COLLECTION, query)
            .await
            .map_err(ChatError::store("get user rooms"))?;

        Ok(results.iter().map(decode_stored).collect())
    }
}
