use axum::response::{IntoResponse, Response};
use http::{StatusCode, header::CONTENT_TYPE};
use s3manager_common::error::ManagerError;
use tracing::error;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Failure of a JSON/API handler. The response body is the error text.
pub struct ApiError(pub ManagerError);

/// Failure of an HTML view handler. The response body is the status text.
pub struct ViewError(pub ManagerError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(code = self.0.code(), error = %self.0, "api request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, TEXT_PLAIN)],
            self.0.to_string(),
        )
            .into_response()
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        error!(code = self.0.code(), error = %self.0, "view request failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            [(CONTENT_TYPE, TEXT_PLAIN)],
            status.canonical_reason().unwrap_or_default(),
        )
            .into_response()
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        ApiError(err)
    }
}

impl From<ManagerError> for ViewError {
    fn from(err: ManagerError) -> Self {
        ViewError(err)
    }
}
