//! Test fixtures: an in-process fake of the Firestore REST document API.
//!
//! Implements just enough surface for the chat layer: document create
//! (`POST ?documentId=`), fetch (`GET`), partial update (`PATCH`), and
//! `:runQuery` with ordering, limit, start-after cursor, and OR composite
//! filters. Documents live in a process-local map keyed by their
//! database-relative path.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};

#[derive(Default)]
struct FirestoreState {
    /// Database-relative document path -> wire fields object.
    documents: BTreeMap<String, Value>,
    counter: u64,
}

type Shared = Arc<Mutex<FirestoreState>>;

/// A fake Firestore bound to an ephemeral local port.
pub struct FakeFirestore {
    addr: SocketAddr,
}

impl FakeFirestore {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route(
                "/v1/projects/{project}/databases/{database}/documents/{*path}",
                get(get_document).post(post_document).patch(patch_document),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake Firestore listener");
        let addr = listener.local_addr().expect("failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("fake Firestore server failed");
        });

        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn resource_name(project: &str, database: &str, path: &str) -> String {
    format!("projects/{project}/databases/{database}/documents/{path}")
}

fn document_response(project: &str, database: &str, path: &str, fields: &Value) -> Value {
    json!({
        "name": resource_name(project, database, path),
        "fields": fields,
    })
}

async fn post_document(
    State(state): State<Shared>,
    Path((project, database, path)): Path<(String, String, String)>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if let Some(parent) = path.strip_suffix(":runQuery") {
        return run_query(&state, &project, &database, parent, &body);
    }

    let mut guard = state.lock().unwrap();
    let document_id = match params.get("documentId").filter(|id| !id.is_empty()) {
        Some(id) => id.clone(),
        None => {
            guard.counter += 1;
            format!("auto-{}", guard.counter)
        }
    };
    let full_path = format!("{path}/{document_id}");
    let fields = body.get("fields").cloned().unwrap_or_else(|| json!({}));
    guard.documents.insert(full_path.clone(), fields.clone());

    Ok(Json(document_response(&project, &database, &full_path, &fields)))
}

async fn get_document(
    State(state): State<Shared>,
    Path((project, database, path)): Path<(String, String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let guard = state.lock().unwrap();
    let fields = guard.documents.get(&path).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(document_response(&project, &database, &path, fields)))
}

async fn patch_document(
    State(state): State<Shared>,
    Path((project, database, path)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut guard = state.lock().unwrap();
    let stored = guard.documents.get_mut(&path).ok_or(StatusCode::NOT_FOUND)?;

    // Merge the provided fields; untouched fields survive, matching the
    // update-mask semantics the client sends.
    if let (Some(target), Some(updates)) = (stored.as_object_mut(), body.get("fields").and_then(Value::as_object)) {
        for (name, value) in updates {
            target.insert(name.clone(), value.clone());
        }
    }

    let fields = stored.clone();
    Ok(Json(document_response(&project, &database, &path, &fields)))
}

fn run_query(
    state: &Shared,
    project: &str,
    database: &str,
    parent: &str,
    body: &Value,
) -> Result<Json<Value>, StatusCode> {
    let query = body.get("structuredQuery").ok_or(StatusCode::BAD_REQUEST)?;
    let guard = state.lock().unwrap();

    // Direct children of the parent path only.
    let prefix = format!("{parent}/");
    let mut matches: Vec<(String, Value)> = guard
        .documents
        .iter()
        .filter(|(path, _)| {
            path.strip_prefix(&prefix)
                .is_some_and(|rest| !rest.contains('/'))
        })
        .map(|(path, fields)| (path.clone(), fields.clone()))
        .collect();

    if let Some(filters) = query
        .pointer("/where/compositeFilter/filters")
        .and_then(Value::as_array)
    {
        matches.retain(|(_, fields)| {
            filters
                .iter()
                .any(|filter| field_filter_matches(filter, fields))
        });
    }

    if let Some(order) = query.pointer("/orderBy/0") {
        let field = order
            .pointer("/field/fieldPath")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let descending = order.get("direction").and_then(Value::as_str) == Some("DESCENDING");
        matches.sort_by_key(|(_, fields)| sort_key(fields, &field));
        if descending {
            matches.reverse();
        }
    }

    // The cursor starts the window strictly after the referenced document.
    if let Some(reference) = query
        .pointer("/startAt/values/0/referenceValue")
        .and_then(Value::as_str)
    {
        if let Some(position) = matches
            .iter()
            .position(|(path, _)| resource_name(project, database, path) == reference)
        {
            matches.drain(..=position);
        }
    }

    if let Some(limit) = query.get("limit").and_then(Value::as_u64) {
        matches.truncate(limit as usize);
    }

    if matches.is_empty() {
        return Ok(Json(json!([{ "readTime": "1970-01-01T00:00:00Z" }])));
    }

    let rows: Vec<Value> = matches
        .into_iter()
        .map(|(path, fields)| {
            json!({ "document": document_response(project, database, &path, &fields) })
        })
        .collect();
    Ok(Json(Value::Array(rows)))
}

fn field_filter_matches(filter: &Value, fields: &Value) -> bool {
    let Some(field_filter) = filter.get("fieldFilter") else {
        return false;
    };
    let field = field_filter
        .pointer("/field/fieldPath")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let op = field_filter
        .get("op")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let expected = field_filter.get("value").cloned().unwrap_or(Value::Null);
    let actual = fields.get(field);

    match op {
        "EQUAL" => actual == Some(&expected),
        "ARRAY_CONTAINS" => actual
            .and_then(|value| value.pointer("/arrayValue/values"))
            .and_then(Value::as_array)
            .is_some_and(|values| values.contains(&expected)),
        _ => false,
    }
}

fn sort_key(fields: &Value, field: &str) -> String {
    let Some(value) = fields.get(field) else {
        return String::new();
    };
    for tag in ["timestampValue", "stringValue", "integerValue"] {
        if let Some(text) = value.get(tag).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    value.to_string()
}
