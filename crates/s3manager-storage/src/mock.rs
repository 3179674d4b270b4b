use async_trait::async_trait;
use bytes::Bytes;
use s3manager_common::{
    error::{ManagerError, Result},
    types::{BucketInfo, ObjectInfo},
};

use crate::traits::{CopyConditions, GetObjectOutput, ObjectStore};

type ListBucketsFn = Box<dyn Fn() -> Result<Vec<BucketInfo>> + Send + Sync>;
type BucketFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type ListObjectsFn = Box<dyn Fn(&str, &str) -> Result<Vec<ObjectInfo>> + Send + Sync>;
type GetObjectFn = Box<dyn Fn(&str, &str) -> Result<GetObjectOutput> + Send + Sync>;
type PutObjectFn = Box<dyn Fn(&str, &str, Bytes, Option<&str>) -> Result<()> + Send + Sync>;
type CopyObjectFn = Box<dyn Fn(&str, &str, &str, &CopyConditions) -> Result<()> + Send + Sync>;
type ObjectFn = Box<dyn Fn(&str, &str) -> Result<()> + Send + Sync>;

/// Test double whose behaviour is supplied per operation.
///
/// Calling an operation that has no closure configured fails, so a test only
/// wires up the calls it expects.
#[derive(Default)]
pub struct MockObjectStore {
    list_buckets_fn: Option<ListBucketsFn>,
    make_bucket_fn: Option<BucketFn>,
    remove_bucket_fn: Option<BucketFn>,
    list_objects_fn: Option<ListObjectsFn>,
    get_object_fn: Option<GetObjectFn>,
    put_object_fn: Option<PutObjectFn>,
    copy_object_fn: Option<CopyObjectFn>,
    remove_object_fn: Option<ObjectFn>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_list_buckets<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<Vec<BucketInfo>> + Send + Sync + 'static,
    {
        self.list_buckets_fn = Some(Box::new(f));
        self
    }

    pub fn on_make_bucket<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        self.make_bucket_fn = Some(Box::new(f));
        self
    }

    pub fn on_remove_bucket<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        self.remove_bucket_fn = Some(Box::new(f));
        self
    }

    pub fn on_list_objects<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Vec<ObjectInfo>> + Send + Sync + 'static,
    {
        self.list_objects_fn = Some(Box::new(f));
        self
    }

    pub fn on_get_object<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<GetObjectOutput> + Send + Sync + 'static,
    {
        self.get_object_fn = Some(Box::new(f));
        self
    }

    pub fn on_put_object<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, Bytes, Option<&str>) -> Result<()> + Send + Sync + 'static,
    {
        self.put_object_fn = Some(Box::new(f));
        self
    }

    pub fn on_copy_object<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, &str, &CopyConditions) -> Result<()> + Send + Sync + 'static,
    {
        self.copy_object_fn = Some(Box::new(f));
        self
    }

    pub fn on_remove_object<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.remove_object_fn = Some(Box::new(f));
        self
    }
}

fn unconfigured(operation: &str) -> ManagerError {
    ManagerError::InternalError(format!("mock {operation} not configured"))
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let f = self
            .list_buckets_fn
            .as_ref()
            .ok_or_else(|| unconfigured("list_buckets"))?;
        f()
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        let f = self
            .make_bucket_fn
            .as_ref()
            .ok_or_else(|| unconfigured("make_bucket"))?;
        f(bucket)
    }

    async fn remove_bucket(&self, bucket: &str) -> Result<()> {
        let f = self
            .remove_bucket_fn
            .as_ref()
            .ok_or_else(|| unconfigured("remove_bucket"))?;
        f(bucket)
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let f = self
            .list_objects_fn
            .as_ref()
            .ok_or_else(|| unconfigured("list_objects"))?;
        f(bucket, prefix)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput> {
        let f = self
            .get_object_fn
            .as_ref()
            .ok_or_else(|| unconfigured("get_object"))?;
        f(bucket, key)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        let f = self
            .put_object_fn
            .as_ref()
            .ok_or_else(|| unconfigured("put_object"))?;
        f(bucket, key, data, content_type)
    }

    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        source: &str,
        conditions: &CopyConditions,
    ) -> Result<()> {
        let f = self
            .copy_object_fn
            .as_ref()
            .ok_or_else(|| unconfigured("copy_object"))?;
        f(bucket, key, source, conditions)
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        let f = self
            .remove_object_fn
            .as_ref()
            .ok_or_else(|| unconfigured("remove_object"))?;
        f(bucket, key)
    }
}
