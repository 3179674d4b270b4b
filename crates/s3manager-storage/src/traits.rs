use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use s3manager_common::error::Result;
use s3manager_common::types::{BucketInfo, ObjectInfo};
use serde::{Deserialize, Serialize};

/// Preconditions evaluated by the store against the copy source.
///
/// The default value carries no conditions, so the copy is unconditional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyConditions {
    pub match_etag: Option<String>,
    pub match_etag_except: Option<String>,
    pub modified_since: Option<DateTime<Utc>>,
    pub unmodified_since: Option<DateTime<Utc>>,
}

impl CopyConditions {
    pub fn is_empty(&self) -> bool {
        self.match_etag.is_none()
            && self.match_etag_except.is_none()
            && self.modified_since.is_none()
            && self.unmodified_since.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct GetObjectOutput {
    pub info: ObjectInfo,
    pub data: Bytes,
}

/// Builds the `/<bucket>/<key>` path that identifies a copy source.
pub fn object_source(bucket: &str, key: &str) -> String {
    format!("/{bucket}/{key}")
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;
    async fn make_bucket(&self, bucket: &str) -> Result<()>;
    async fn remove_bucket(&self, bucket: &str) -> Result<()>;
    /// Lists every object under `prefix`, descending into "directories".
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput>;
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()>;
    /// Copies `source` (as built by [`object_source`]) to `bucket`/`key`.
    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        source: &str,
        conditions: &CopyConditions,
    ) -> Result<()>;
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_source_keeps_nested_keys() {
        assert_eq!(object_source("photos", "2024/cat.png"), "/photos/2024/cat.png");
    }

    #[test]
    fn default_conditions_are_empty() {
        assert!(CopyConditions::default().is_empty());
        let conditions = CopyConditions {
            match_etag: Some("\"abc\"".to_string()),
            ..CopyConditions::default()
        };
        assert!(!conditions.is_empty());
    }
}
