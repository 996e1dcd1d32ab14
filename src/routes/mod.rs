use axum::{
    debug_handler, extract::State, middleware, response::IntoResponse, routing::get, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::cors::CorsLayer;

use crate::{
    configuration::Settings,
    modules::latency::{self, LatencyStats},
    state::AppState,
    store::MessageStore,
};

pub mod messages;

pub fn app(config: Settings) -> Router {
    let state = AppState::new(config);

    Router::new()
        .merge(messages::router())
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(state.clone(), latency::track))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[debug_handler(state = AppState)]
async fn health_check(
    State(store): State<Arc<MessageStore>>,
    State(stats): State<Arc<LatencyStats>>,
) -> impl IntoResponse {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": 1,
        "timestamp": timestamp,
        "message_count": store.len(),
        "avg_latency_ms": stats.average_ms(),
    }))
}
