//! Firestore REST implementation of the document-store port.
//!
//! Speaks plain HTTP against the `v1` document endpoints:
//! POST (create), GET, PATCH, and POST `:runQuery`. Request signing and
//! token refresh are out-of-scope collaborators; nothing here retries,
//! caches, or keeps state beyond the injected client.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::{
    ConditionOp, Direction, Document, DocumentStore, Filter, StoreError, StoredDocument,
    StructuredQuery,
};

use super::config::FirestoreConfig;

/// Document store backed by the Firestore REST API.
pub struct FirestoreRestStore {
    http: reqwest::Client,
    documents_url: String,
    database_root: String,
}

impl FirestoreRestStore {
    /// Build a store from an externally constructed HTTP client and config.
    pub fn new(http: reqwest::Client, config: FirestoreConfig) -> Self {
        Self {
            http,
            documents_url: config.documents_url(),
            database_root: config.database_root(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.documents_url)
    }

    /// Fully qualified resource name for a database-relative document path.
    fn resource_name(&self, path: &str) -> String {
        format!("{}/{path}", self.database_root)
    }

    async fn read_document(response: reqwest::Response) -> Result<StoredDocument, StoreError> {
        let body: Value = response
            .json()
            .await
            .map_err(|error| StoreError::MalformedResponse(error.to_string()))?;
        parse_stored(&body)
    }

    fn query_body(&self, query: &StructuredQuery) -> Value {
        let mut structured = json!({
            "from": [{ "collectionId": query.collection_id }],
        });

        if !query.order_by.is_empty() {
            let order_by: Vec<Value> = query
                .order_by
                .iter()
                .map(|order| {
                    json!({
                        "field": { "fieldPath": order.field },
                        "direction": match order.direction {
                            Direction::Ascending => "ASCENDING",
                            Direction::Descending => "DESCENDING",
                        },
                    })
                })
                .collect();
            structured["orderBy"] = Value::Array(order_by);
        }

        if let Some(limit) = query.limit {
            structured["limit"] = json!(limit);
        }

        if let Some(path) = &query.start_after {
            // The cursor references the document the window starts after;
            // only this adapter knows the project-qualified resource name.
            structured["startAt"] = json!({
                "values": [{ "referenceValue": self.resource_name(path) }],
            });
        }

        if let Some(Filter::AnyOf(conditions)) = &query.filter {
            let filters: Vec<Value> = conditions
                .iter()
                .map(|condition| {
                    json!({
                        "fieldFilter": {
                            "field": { "fieldPath": condition.field },
                            "op": match condition.op {
                                ConditionOp::Equal => "EQUAL",
                                ConditionOp::ArrayContains => "ARRAY_CONTAINS",
                            },
                            "value": condition.value.to_wire(),
                        },
                    })
                })
                .collect();
            structured["where"] = json!({
                "compositeFilter": { "op": "OR", "filters": filters },
            });
        }

        json!({ "structuredQuery": structured })
    }
}

#[async_trait]
impl DocumentStore for FirestoreRestStore {
    async fn create_document(
        &self,
        parent: &str,
        document_id: &str,
        document: Document,
    ) -> Result<StoredDocument, StoreError> {
        tracing::debug!(parent, document_id, "creating document");
        let response = self
            .http
            .post(self.url(parent))
            .query(&[("documentId", document_id)])
            .json(&document.to_wire())
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        Self::read_document(response).await
    }

    async fn get_document(&self, path: &str) -> Result<StoredDocument, StoreError> {
        tracing::debug!(path, "fetching document");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        Self::read_document(response).await
    }

    async fn patch_document(
        &self,
        path: &str,
        document: Document,
    ) -> Result<StoredDocument, StoreError> {
        tracing::debug!(path, "patching document");
        // An update mask scoped to the provided fields keeps this a partial
        // update; an unmasked PATCH would replace the whole document.
        let mask: Vec<(&str, &str)> = document
            .field_names()
            .map(|field| ("updateMask.fieldPaths", field))
            .collect();
        let response = self
            .http
            .patch(self.url(path))
            .query(&mask)
            .json(&document.to_wire())
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        Self::read_document(response).await
    }

    async fn run_query(
        &self,
        parent: &str,
        query: StructuredQuery,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        tracing::debug!(parent, collection = %query.collection_id, "running query");
        let url = format!("{}:runQuery", self.url(parent));
        let response = self
            .http
            .post(url)
            .json(&self.query_body(&query))
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        let rows: Value = response
            .json()
            .await
            .map_err(|error| StoreError::MalformedResponse(error.to_string()))?;
        let rows = rows
            .as_array()
            .ok_or_else(|| StoreError::MalformedResponse("query response is not an array".into()))?;

        // Rows without a document key (readTime-only progress rows) are
        // skipped, matching the decode posture elsewhere.
        rows.iter()
            .filter_map(|row| row.get("document"))
            .map(parse_stored)
            .collect()
    }
}

fn transport(error: reqwest::Error) -> StoreError {
    StoreError::Transport(error.to_string())
}

fn parse_stored(body: &Value) -> Result<StoredDocument, StoreError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::MalformedResponse("document response missing name".into()))?;
    Ok(StoredDocument {
        name: name.to_string(),
        document: Document::from_wire(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, TypedValue};

    fn store() -> FirestoreRestStore {
        FirestoreRestStore::new(
            reqwest::Client::new(),
            FirestoreConfig::new("krishi-test"),
        )
    }

    #[test]
    fn test_url_building() {
        // given:
        let store = store();

        // then:
        assert_eq!(
            store.url("chat_rooms/r1"),
            "https://firestore.googleapis.com/v1/projects/krishi-test/databases/(default)/documents/chat_rooms/r1"
        );
        assert_eq!(
            store.resource_name("chat_rooms/r1"),
            "projects/krishi-test/databases/(default)/documents/chat_rooms/r1"
        );
    }

    #[test]
    fn test_query_body_with_ordering_limit_and_cursor() {
        // given:
        let query = StructuredQuery::collection("messages")
            .descending("timestamp")
            .with_limit(2)
            .starting_after("chat_rooms/r1/messages/m2");

        // when:
        let body = store().query_body(&query);

        // then:
        let structured = &body["structuredQuery"];
        assert_eq!(structured["from"][0]["collectionId"], "messages");
        assert_eq!(structured["orderBy"][0]["field"]["fieldPath"], "timestamp");
        assert_eq!(structured["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(structured["limit"], 2);
        assert_eq!(
            structured["startAt"]["values"][0]["referenceValue"],
            "projects/krishi-test/databases/(default)/documents/chat_rooms/r1/messages/m2"
        );
        assert!(structured.get("where").is_none());
    }

    #[test]
    fn test_query_body_with_or_filter() {
        // given:
        let query = StructuredQuery::collection("chat_rooms").matching_any(vec![
            Condition::equal("created_by", TypedValue::String("u1".to_string())),
            Condition::array_contains("participants", TypedValue::String("u1".to_string())),
        ]);

        // when:
        let body = store().query_body(&query);

        // then:
        let composite = &body["structuredQuery"]["where"]["compositeFilter"];
        assert_eq!(composite["op"], "OR");
        let filters = composite["filters"].as_array().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(
            filters[0]["fieldFilter"]["field"]["fieldPath"],
            "created_by"
        );
        assert_eq!(filters[0]["fieldFilter"]["op"], "EQUAL");
        assert_eq!(
            filters[0]["fieldFilter"]["value"],
            serde_json::json!({ "stringValue": "u1" })
        );
        assert_eq!(filters[1]["fieldFilter"]["op"], "ARRAY_CONTAINS");
    }

    #[test]
    fn test_parse_stored_requires_name() {
        // given:
        let body = serde_json::json!({ "fields": { "name": { "stringValue": "x" } } });

        // when / then:
        assert!(matches!(
            parse_stored(&body),
            Err(StoreError::MalformedResponse(_))
        ));
    }
}
