use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::{
    AppState,
    error::ViewError,
    views::{BUCKET_TEMPLATE, BucketPage},
};

pub async fn bucket_view(
    State(state): State<Arc<AppState>>,
    Path(bucket): Path<String>,
) -> Result<Html<String>, ViewError> {
    let objects = state.store().list_objects(&bucket, "").await?;
    let page = BucketPage::new(&bucket, &objects);
    Ok(Html(state.views().render(BUCKET_TEMPLATE, &page)?))
}
