use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error};

use crate::{
    domain::{
        errors::{StorageError, StorageResult, ValidationError},
        models::{CopyReceipt, Existence, ObjectSummary, UploadReceipt},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::{BucketOptions, StorageBackend},
};

/// Bucket used when callers do not name one
pub const DEFAULT_BUCKET: &str = "public";

/// Facade over an S3-compatible backend: bucket-aware upload, download,
/// existence check, delete and copy.
///
/// Buckets are provisioned lazily on first upload. All operations are
/// independent calls over one immutable backend handle; nothing is
/// cached between calls. A missing or empty key is treated as "nothing
/// to do" rather than an error, except for `upload`, which rejects it.
pub struct ObjectStorageGateway {
    backend: Arc<dyn StorageBackend>,
    region: String,
}

impl ObjectStorageGateway {
    pub fn new(backend: Arc<dyn StorageBackend>, region: impl Into<String>) -> Self {
        Self {
            backend,
            region: region.into(),
        }
    }

    /// Upload a local file to `(bucket, key)`, overwriting any existing
    /// object. The bucket is created with public-read access and object
    /// lock enabled if it does not exist yet.
    pub async fn upload(
        &self,
        key: Option<&str>,
        local_source: impl AsRef<Path>,
        bucket: Option<&str>,
    ) -> StorageResult<UploadReceipt> {
        let key = normalize_key(key).ok_or(ValidationError::EmptyObjectKey)?;
        let key = ObjectKey::new(key)?;
        let bucket = bucket_or_default(bucket)?;

        self.ensure_bucket(&bucket).await?;

        let path = local_source.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let size = data.len() as u64;

        match self
            .backend
            .put_object(&bucket, &key, Bytes::from(data), None)
            .await
        {
            Ok(etag) => {
                debug!(%bucket, %key, size, "stored object");
                Ok(UploadReceipt {
                    bucket,
                    key,
                    size,
                    etag,
                })
            }
            Err(err) => {
                error!(%bucket, %key, %err, "upload failed");
                Err(err)
            }
        }
    }

    /// Publicly addressable URL for `(bucket, key)`. Returns an empty
    /// string for a missing key; never verifies that the object exists.
    pub fn object_url(&self, key: Option<&str>, bucket: Option<&str>) -> String {
        let Some(key) = normalize_key(key) else {
            return String::new();
        };
        let (Ok(bucket), Ok(key)) = (bucket_or_default(bucket), ObjectKey::new(key)) else {
            return String::new();
        };
        self.backend.object_url(&bucket, &key)
    }

    /// List the objects of a bucket (single page, as provided by the
    /// backend's list call).
    pub async fn list_all(&self, bucket: Option<&str>) -> StorageResult<Vec<ObjectSummary>> {
        let bucket = bucket_or_default(bucket)?;
        self.backend.list_objects(&bucket).await
    }

    /// Fetch the full object body into memory. A missing key returns
    /// empty bytes without touching the backend.
    pub async fn get_object(
        &self,
        key: Option<&str>,
        bucket: Option<&str>,
    ) -> StorageResult<Bytes> {
        let Some(key) = normalize_key(key) else {
            return Ok(Bytes::new());
        };
        let key = ObjectKey::new(key)?;
        let bucket = bucket_or_default(bucket)?;
        self.backend.get_object(&bucket, &key).await
    }

    /// Delete `(bucket, key)` if it exists. A missing key or an object
    /// that is already gone is not an error; no delete call is issued.
    pub async fn delete_object(
        &self,
        key: Option<&str>,
        bucket: Option<&str>,
    ) -> StorageResult<()> {
        let Some(key) = normalize_key(key) else {
            return Ok(());
        };
        let key = ObjectKey::new(key)?;
        let bucket = bucket_or_default(bucket)?;

        if !self.backend.object_exists(&bucket, &key).await? {
            return Ok(());
        }

        if let Err(err) = self.backend.delete_object(&bucket, &key).await {
            error!(%bucket, %key, %err, "delete failed");
            return Err(err);
        }
        Ok(())
    }

    /// Check whether `(bucket, key)` exists. A non-empty `original`
    /// replaces `key` for the check (used by [`copy`](Self::copy) to
    /// resolve a source object under its original name).
    pub async fn object_exists(
        &self,
        key: Option<&str>,
        bucket: Option<&str>,
        original: Option<&str>,
    ) -> StorageResult<Existence> {
        let Some(key) = normalize_key(key) else {
            return Ok(Existence::Unspecified);
        };
        let key = normalize_key(original).unwrap_or(key);
        let key = ObjectKey::new(key)?;
        let bucket = bucket_or_default(bucket)?;

        let present = self.backend.object_exists(&bucket, &key).await?;
        Ok(Existence::from_bool(present))
    }

    /// Copy `source_key` to `(bucket, destination_key)`.
    ///
    /// The source is always resolved in the "public" bucket; `bucket`
    /// selects the destination only. Returns `Ok(None)` without issuing
    /// a copy call when the source does not exist.
    pub async fn copy(
        &self,
        destination_key: &str,
        source_key: &str,
        bucket: Option<&str>,
        original: Option<&str>,
    ) -> StorageResult<Option<CopyReceipt>> {
        let existence = self
            .object_exists(Some(source_key), Some(DEFAULT_BUCKET), original)
            .await?;
        if !existence.is_present() {
            return Ok(None);
        }

        let source_bucket = BucketName::new(DEFAULT_BUCKET)?;
        let source_key = ObjectKey::new(source_key)?;
        let destination_bucket = bucket_or_default(bucket)?;
        let destination_key = ObjectKey::new(destination_key)?;

        match self
            .backend
            .copy_object(
                &source_bucket,
                &source_key,
                &destination_bucket,
                &destination_key,
            )
            .await
        {
            Ok(etag) => {
                debug!(%source_key, bucket = %destination_bucket, key = %destination_key, "copied object");
                Ok(Some(CopyReceipt {
                    bucket: destination_bucket,
                    key: destination_key,
                    etag,
                }))
            }
            Err(err) => {
                error!(%source_key, %destination_key, %err, "copy failed");
                Err(err)
            }
        }
    }

    /// Existence is re-checked on every upload; nothing is cached.
    async fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        if self.backend.bucket_exists(bucket).await? {
            return Ok(());
        }
        debug!(%bucket, region = %self.region, "creating bucket");
        self.backend
            .create_bucket(bucket, &BucketOptions::public_read(&self.region))
            .await
    }
}

fn normalize_key(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

fn bucket_or_default(bucket: Option<&str>) -> StorageResult<BucketName> {
    Ok(BucketName::new(bucket.unwrap_or(DEFAULT_BUCKET))?)
}
