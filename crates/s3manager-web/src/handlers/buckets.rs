use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use s3manager_common::error::ManagerError;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ViewError},
    types::CreateBucketRequest,
    views::{BUCKETS_TEMPLATE, BucketsPage},
};

pub async fn buckets_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, ViewError> {
    let buckets = state.store().list_buckets().await?;
    let page = BucketsPage::new(&buckets);
    Ok(Html(state.views().render(BUCKETS_TEMPLATE, &page)?))
}

pub async fn create_bucket(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let bucket: CreateBucketRequest = serde_json::from_slice(&body).map_err(ManagerError::from)?;
    state.store().make_bucket(&bucket.name).await?;
    info!(bucket = %bucket.name, "bucket created");
    Ok((StatusCode::CREATED, Json(bucket)).into_response())
}

pub async fn delete_bucket(
    State(state): State<Arc<AppState>>,
    Path(bucket): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store().remove_bucket(&bucket).await?;
    info!(bucket = %bucket, "bucket removed");
    Ok(StatusCode::NO_CONTENT)
}
