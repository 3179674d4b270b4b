#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use s3manager_storage::MockObjectStore;
use s3manager_web::{AppState, WebConfig, app_router};
use tower::ServiceExt;

pub fn template_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("web")
        .join("template")
}

pub fn web_config() -> WebConfig {
    WebConfig {
        template_dir: template_dir(),
        ..WebConfig::default()
    }
}

pub fn app_with_config(store: MockObjectStore, config: &WebConfig) -> Router {
    let state = AppState::new(Arc::new(store), config).expect("templates load");
    app_router(Arc::new(state))
}

pub fn app(store: MockObjectStore) -> Router {
    app_with_config(store, &web_config())
}

pub async fn send(store: MockObjectStore, request: Request<Body>) -> Response<Body> {
    app(store).oneshot(request).await.expect("router is infallible")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf-8 body")
}
