use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::{AppState, handlers};

pub fn app_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes();

    Router::new()
        .route("/", get(handlers::root_redirect))
        .route("/buckets", get(handlers::buckets::buckets_view))
        .route("/buckets/{bucket}", get(handlers::bucket::bucket_view))
        .route("/api/buckets", post(handlers::buckets::create_bucket))
        .route(
            "/api/buckets/{bucket}",
            delete(handlers::buckets::delete_bucket),
        )
        .route(
            "/api/buckets/{bucket}/objects",
            post(handlers::objects::create_object),
        )
        .route(
            "/api/buckets/{bucket}/objects/{*object}",
            get(handlers::objects::get_object).delete(handlers::objects::delete_object),
        )
        .route("/health/live", get(handlers::health::health_live))
        .route("/health/ready", get(handlers::health::health_ready))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
