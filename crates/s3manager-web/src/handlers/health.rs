use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::AppState;

pub async fn health_live() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store().list_buckets().await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            warn!(error = %err, "object store is not reachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
