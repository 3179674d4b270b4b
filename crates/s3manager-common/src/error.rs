use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("bucket not found: {0}")]
    BucketNotFound(String),
    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("storage request failed: {0}")]
    Storage(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("internal error: {0}")]
    InternalError(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ManagerError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BucketNotFound(_) => "NoSuchBucket",
            Self::ObjectNotFound { .. } => "NoSuchKey",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::Storage(_) => "StorageError",
            Self::Template(_) => "TemplateError",
            Self::InternalError(_) => "InternalError",
            Self::Json(_) => "MalformedJSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, ManagerError>;
