use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    Client,
    config::{Credentials, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    primitives::{ByteStream, DateTime as AwsDateTime},
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use s3manager_common::{
    error::{ManagerError, Result},
    time::from_unix,
    types::{BucketInfo, ObjectInfo},
};
use tracing::{debug, info};

use crate::config::{DEFAULT_REGION, S3Config};
use crate::traits::{CopyConditions, GetObjectOutput, ObjectStore};

// Unreserved characters plus the path separator stay literal in x-amz-copy-source.
const COPY_SOURCE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const NO_SUCH_BUCKET: &str = "NoSuchBucket";

#[derive(Debug, Clone)]
pub struct AwsObjectStore {
    client: Client,
    region: String,
}

impl AwsObjectStore {
    pub async fn new(config: &S3Config) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;

        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "s3manager",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style)
            .build();

        info!(endpoint = %endpoint, region = %config.region, "s3 client configured");
        Ok(Self {
            client: Client::from_conf(s3_config),
            region: config.region.clone(),
        })
    }

    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

fn storage_error<E, R>(action: &str, err: SdkError<E, R>) -> ManagerError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    ManagerError::Storage(format!("{action}: {}", DisplayErrorContext(&err)))
}

fn is_no_such_bucket<E: ProvideErrorMetadata>(err: &E) -> bool {
    err.code() == Some(NO_SUCH_BUCKET)
}

fn bucket_error<E, R>(action: &str, bucket: &str, err: SdkError<E, R>) -> ManagerError
where
    E: std::error::Error + ProvideErrorMetadata + 'static,
    R: std::fmt::Debug,
{
    if err.as_service_error().is_some_and(is_no_such_bucket) {
        ManagerError::BucketNotFound(bucket.to_string())
    } else {
        storage_error(action, err)
    }
}

fn to_chrono(dt: Option<&AwsDateTime>) -> Option<DateTime<Utc>> {
    dt.and_then(|dt| from_unix(dt.secs(), dt.subsec_nanos()))
}

fn to_aws(dt: Option<&DateTime<Utc>>) -> Option<AwsDateTime> {
    dt.map(|dt| AwsDateTime::from_secs(dt.timestamp()))
}

pub(crate) fn encode_copy_source(source: &str) -> String {
    utf8_percent_encode(source, COPY_SOURCE).to_string()
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|err| storage_error("list buckets", err))?;

        let buckets = output
            .buckets()
            .iter()
            .filter_map(|bucket| {
                bucket.name().map(|name| BucketInfo {
                    name: name.to_string(),
                    created: to_chrono(bucket.creation_date()),
                })
            })
            .collect::<Vec<_>>();
        debug!(count = buckets.len(), "listed buckets");
        Ok(buckets)
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|err| storage_error("make bucket", err))?;
        debug!(bucket, "bucket created");
        Ok(())
    }

    async fn remove_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| bucket_error("remove bucket", bucket, err))?;
        debug!(bucket, "bucket removed");
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|err| bucket_error("list objects", bucket, err))?;

            objects.extend(output.contents().iter().filter_map(|object| {
                object.key().map(|key| ObjectInfo {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    size: object.size().unwrap_or_default(),
                    last_modified: to_chrono(object.last_modified()),
                    etag: object.e_tag().map(str::to_string),
                    content_type: None,
                })
            }));

            continuation_token = output.next_continuation_token().map(str::to_string);
            if !output.is_truncated().unwrap_or(false) || continuation_token.is_none() {
                break;
            }
        }

        debug!(bucket, prefix, count = objects.len(), "listed objects");
        Ok(objects)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    ManagerError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    bucket_error("get object", bucket, err)
                }
            })?;

        let mut info = ObjectInfo::new(bucket, key, output.content_length().unwrap_or_default());
        info.last_modified = to_chrono(output.last_modified());
        info.etag = output.e_tag().map(str::to_string);
        info.content_type = output.content_type().map(str::to_string);

        let data = output
            .body
            .collect()
            .await
            .map_err(|err| ManagerError::Storage(format!("read object body: {err}")))?
            .into_bytes();
        debug!(bucket, key, size = data.len(), "fetched object");

        Ok(GetObjectOutput { info, data })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|err| storage_error("put object", err))?;
        debug!(bucket, key, size, "stored object");
        Ok(())
    }

    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        source: &str,
        conditions: &CopyConditions,
    ) -> Result<()> {
        self.client
            .copy_object()
            .bucket(bucket)
            .key(key)
            .copy_source(encode_copy_source(source))
            .set_copy_source_if_match(conditions.match_etag.clone())
            .set_copy_source_if_none_match(conditions.match_etag_except.clone())
            .set_copy_source_if_modified_since(to_aws(conditions.modified_since.as_ref()))
            .set_copy_source_if_unmodified_since(to_aws(conditions.unmodified_since.as_ref()))
            .send()
            .await
            .map_err(|err| storage_error("copy object", err))?;
        debug!(bucket, key, source, "copied object");
        Ok(())
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| storage_error("remove object", err))?;
        debug!(bucket, key, "removed object");
        Ok(())
    }
}
