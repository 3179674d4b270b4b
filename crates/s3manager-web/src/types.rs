use serde::{Deserialize, Serialize};

/// Copy request, echoed back unchanged on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyObjectInfo {
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    #[serde(rename = "objectName")]
    pub object_name: String,
    #[serde(rename = "sourceBucketName")]
    pub source_bucket_name: String,
    #[serde(rename = "sourceObjectName")]
    pub source_object_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBucketRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_info_uses_camel_case_names_in_order() {
        let info = CopyObjectInfo {
            bucket_name: "dst".to_string(),
            object_name: "b.txt".to_string(),
            source_bucket_name: "src".to_string(),
            source_object_name: "a.txt".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"bucketName":"dst","objectName":"b.txt","sourceBucketName":"src","sourceObjectName":"a.txt"}"#
        );
    }

    #[test]
    fn copy_info_requires_every_field() {
        let missing = r#"{"bucketName":"dst","objectName":"b.txt","sourceBucketName":"src"}"#;
        assert!(serde_json::from_str::<CopyObjectInfo>(missing).is_err());
    }
}
