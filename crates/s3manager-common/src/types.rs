use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
}

impl BucketInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub bucket: String,
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub content_type: Option<String>,
}

impl ObjectInfo {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, size: i64) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            size,
            last_modified: None,
            etag: None,
            content_type: None,
        }
    }
}
