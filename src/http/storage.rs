//! Storage and queue handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::http::error::ApiError;
use crate::http::server::{observe, AppState};
use crate::observability::metrics;
use crate::storage::StorageType;

/// Which facade a storage route targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Ephemeral,
    Persistent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRequest {
    pub storage_type: StorageType,
    pub key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutRequest {
    pub storage_type: StorageType,
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub version: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRequest {
    pub storage_type: StorageType,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueValueResponse {
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

const ACK: Ack = Ack { ok: true };

pub async fn get_value(
    State(state): State<AppState>,
    Path(kind): Path<StoreKind>,
    Json(request): Json<KeyRequest>,
) -> Json<GetResponse> {
    let start = Instant::now();
    let entry = state.storage(kind).store().get(request.storage_type, &request.key);
    metrics::record_rpc("storage_get", "ok", start);

    Json(match entry {
        Some(entry) => GetResponse {
            found: true,
            version: Some(entry.version),
            value: Some(entry.value),
        },
        None => GetResponse {
            found: false,
            version: None,
            value: None,
        },
    })
}

pub async fn put_value(
    State(state): State<AppState>,
    Path(kind): Path<StoreKind>,
    Json(request): Json<PutRequest>,
) -> Result<Json<Ack>, ApiError> {
    let start = Instant::now();
    let result = state
        .storage(kind)
        .store()
        .put(request.storage_type, &request.key, request.value, request.version)
        .map_err(ApiError::from);

    observe("storage_put", start, result).map(|()| Json(ACK))
}

pub async fn delete_value(
    State(state): State<AppState>,
    Path(kind): Path<StoreKind>,
    Json(request): Json<KeyRequest>,
) -> Json<Ack> {
    let start = Instant::now();
    state
        .storage(kind)
        .store()
        .delete(request.storage_type, &request.key);
    metrics::record_rpc("storage_delete", "ok", start);
    Json(ACK)
}

pub async fn enqueue(
    State(state): State<AppState>,
    Json(request): Json<QueueRequest>,
) -> Result<Json<Ack>, ApiError> {
    let start = Instant::now();
    let result = match request.value {
        Some(value) => {
            state
                .ephemeral
                .get_queue(request.storage_type, &request.name)
                .enqueue(value);
            Ok(())
        }
        None => Err(ApiError::BadRequest("value is required".to_string())),
    };

    observe("queue_enqueue", start, result).map(|()| Json(ACK))
}

pub async fn dequeue(
    State(state): State<AppState>,
    Json(request): Json<QueueRequest>,
) -> Json<QueueValueResponse> {
    let start = Instant::now();
    let value = state
        .ephemeral
        .get_queue(request.storage_type, &request.name)
        .dequeue();
    metrics::record_rpc("queue_dequeue", "ok", start);
    Json(QueueValueResponse { value })
}

pub async fn peek(
    State(state): State<AppState>,
    Json(request): Json<QueueRequest>,
) -> Json<QueueValueResponse> {
    let start = Instant::now();
    let value = state
        .ephemeral
        .get_queue(request.storage_type, &request.name)
        .peek();
    metrics::record_rpc("queue_peek", "ok", start);
    Json(QueueValueResponse { value })
}
