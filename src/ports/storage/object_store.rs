use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::StorageResult,
    models::ObjectSummary,
    value_objects::{BucketName, ObjectKey},
};

/// Options applied when a bucket is provisioned
#[derive(Debug, Clone, Default)]
pub struct BucketOptions {
    pub region: Option<String>,
    pub acl: Option<String>,
    pub object_lock_enabled: bool,
}

impl BucketOptions {
    /// Options for buckets created implicitly on first upload:
    /// public-read access with object lock enabled.
    pub fn public_read(region: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            acl: Some("public-read".to_string()),
            object_lock_enabled: true,
        }
    }
}

/// Port for the S3-compatible storage backend.
/// This abstracts the actual backend (MinIO, AWS S3, in-memory, ...).
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Check if a bucket exists
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool>;

    /// Create a bucket with the given options
    async fn create_bucket(
        &self,
        bucket: &BucketName,
        options: &BucketOptions,
    ) -> StorageResult<()>;

    /// Store object data, overwriting any existing object at the key.
    /// Returns the backend ETag when one is provided.
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<Option<String>>;

    /// Retrieve the full object body
    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Bytes>;

    /// Delete an object
    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()>;

    /// Check if an object exists
    async fn object_exists(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool>;

    /// List the objects of a bucket, single-page semantics as provided
    /// by the backend's list call
    async fn list_objects(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectSummary>>;

    /// Server-side copy. Returns the new object's ETag when provided.
    async fn copy_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Option<String>>;

    /// Publicly addressable URL for an object. Does not verify existence.
    fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> String;
}
