use crate::errors::ApiError;
use crate::models::UserMessage;
use crate::modules::extractors::api_key::ApiKey;
use crate::state::AppState;
use crate::store::{epoch_ms, MessageStore};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{debug_handler, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/raw-user-message", post(post_user_message))
        .route("/raw-user-message/", get(fetch_user_messages))
        .route("/raw-user-message/:message_id", get(fetch_user_message))
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    200
}

#[debug_handler(state = AppState)]
async fn post_user_message(
    _key: ApiKey,
    State(store): State<Arc<MessageStore>>,
    message: Result<Json<UserMessage>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(message) = message?;

    let stored = store.put(message);
    info!(
        "Message stored: id={}, sender={}, type={}, latency={}ms",
        stored.id,
        stored.sender_id,
        stored.kind,
        stored.ts_difference.unwrap_or_default()
    );

    Ok(Json(json!({
        "status": "success",
        "message_id": stored.id,
        "stored_at": epoch_ms() / 1000,
        // milliseconds despite the name; kept verbatim for wire compatibility
        "latency_seconds": stored.ts_difference,
    })))
}

#[debug_handler(state = AppState)]
async fn fetch_user_message(
    _key: ApiKey,
    State(store): State<Arc<MessageStore>>,
    Path(message_id): Path<i64>,
) -> Result<Json<UserMessage>, ApiError> {
    let Some(message) = store.get(message_id) else {
        error!("Message with id={message_id} not found");
        return Err(ApiError::NotFound);
    };

    info!("Message fetched: id={message_id}");
    Ok(Json(message))
}

#[debug_handler(state = AppState)]
async fn fetch_user_messages(
    _key: ApiKey,
    State(store): State<Arc<MessageStore>>,
    Query(page): Query<Pagination>,
) -> Json<Vec<UserMessage>> {
    Json(store.list(page.skip, page.limit))
}
