use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use s3manager_common::error::ManagerError;
use s3manager_storage::traits::{CopyConditions, object_source};
use tracing::info;

use crate::{AppState, error::ApiError, types::CopyObjectInfo};

type ApiResult = Result<Response, ApiError>;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const FILE_FIELD: &str = "file";

/// `POST /api/buckets/{bucket}/objects`: JSON bodies copy, multipart forms upload.
pub async fn create_object(
    State(state): State<Arc<AppState>>,
    Path(bucket): Path<String>,
    request: Request,
) -> ApiResult {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if content_type.starts_with("application/json") {
        let body = Bytes::from_request(request, &()).await.map_err(|err| {
            ManagerError::InvalidArgument(format!("failed to read request body: {err}"))
        })?;
        copy_object(State(state), body).await
    } else if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &()).await.map_err(|err| {
            ManagerError::InvalidArgument(format!("invalid multipart request: {err}"))
        })?;
        upload_object(State(state), Path(bucket), multipart).await
    } else {
        Err(ManagerError::InvalidArgument(format!(
            "unsupported content type: {content_type:?}"
        ))
        .into())
    }
}

pub async fn copy_object(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let copy: CopyObjectInfo = serde_json::from_slice(&body).map_err(ManagerError::from)?;

    let source = object_source(&copy.source_bucket_name, &copy.source_object_name);
    state
        .store()
        .copy_object(
            &copy.bucket_name,
            &copy.object_name,
            &source,
            &CopyConditions::default(),
        )
        .await?;
    info!(
        source = %source,
        bucket = %copy.bucket_name,
        key = %copy.object_name,
        "object copied"
    );

    Ok((StatusCode::CREATED, Json(copy)).into_response())
}

pub async fn upload_object(
    State(state): State<Arc<AppState>>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> ApiResult {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        ManagerError::InvalidArgument(format!("invalid multipart field: {err}"))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(ManagerError::InvalidArgument(format!(
                "multipart form has more than one {FILE_FIELD:?} field"
            ))
            .into());
        }

        let key = field
            .file_name()
            .and_then(upload_key)
            .ok_or_else(|| {
                ManagerError::InvalidArgument("uploaded file has no usable file name".to_string())
            })?;
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await.map_err(|err| {
            ManagerError::InvalidArgument(format!("failed to read uploaded file: {err}"))
        })?;
        upload = Some((key, content_type, data));
    }

    let (key, content_type, data) = upload.ok_or_else(|| {
        ManagerError::InvalidArgument(format!("multipart form has no {FILE_FIELD:?} field"))
    })?;

    let size = data.len();
    state
        .store()
        .put_object(&bucket, &key, data, Some(content_type.as_str()))
        .await?;
    info!(bucket = %bucket, key = %key, size, "object uploaded");

    Ok(StatusCode::CREATED.into_response())
}

pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path((bucket, key)): Path<(String, String)>,
) -> ApiResult {
    let object = state.store().get_object(&bucket, &key).await?;

    let content_type = object
        .info
        .content_type
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, header_value(content_type)?);
    headers.insert(CONTENT_DISPOSITION, header_value(&content_disposition(&key))?);

    Ok((StatusCode::OK, headers, object.data).into_response())
}

pub async fn delete_object(
    State(state): State<Arc<AppState>>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.store().remove_object(&bucket, &key).await?;
    info!(bucket = %bucket, key = %key, "object removed");
    Ok(StatusCode::NO_CONTENT)
}

/// Object key for an uploaded file: the last component of the client's file
/// name, with either separator.
fn upload_key(file_name: &str) -> Option<String> {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ManagerError> {
    HeaderValue::from_str(value)
        .map_err(|err| ManagerError::InvalidArgument(format!("invalid header value: {err}")))
}

/// `attachment` disposition naming the last non-empty segment of the key.
///
/// Names outside printable ASCII, or containing quotes or backslashes, are
/// additionally given as an RFC 5987 `filename*` parameter.
fn content_disposition(key: &str) -> String {
    let name = key.rsplit('/').find(|part| !part.is_empty()).unwrap_or(key);
    if name.chars().all(is_plain_filename_char) {
        return format!("attachment; filename=\"{name}\"");
    }

    let fallback = name
        .chars()
        .map(|c| if is_plain_filename_char(c) { c } else { '_' })
        .collect::<String>();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(name, NON_ALPHANUMERIC)
    )
}

fn is_plain_filename_char(c: char) -> bool {
    (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_uses_base_name() {
        assert_eq!(
            content_disposition("reports/2024/q1 summary.pdf"),
            "attachment; filename=\"q1 summary.pdf\""
        );
    }

    #[test]
    fn disposition_names_folder_markers() {
        assert_eq!(
            content_disposition("archive/2023/"),
            "attachment; filename=\"2023\""
        );
    }

    #[test]
    fn upload_keys_drop_client_paths() {
        assert_eq!(upload_key("report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(upload_key("C:\\fakepath\\a.txt").as_deref(), Some("a.txt"));
        assert_eq!(upload_key("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(upload_key("uploads/.."), None);
        assert_eq!(upload_key("dir/"), None);
        assert_eq!(upload_key(""), None);
    }

    #[test]
    fn disposition_escapes_unusual_names() {
        assert_eq!(
            content_disposition("naïve\".txt"),
            "attachment; filename=\"na_ve_.txt\"; filename*=UTF-8''na%C3%AFve%22%2Etxt"
        );
    }
}
