use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::{memory::InMemory, path::Path as ObjectPath, ObjectStore, PutPayload};
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::ObjectSummary,
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::{BucketOptions, StorageBackend},
};

/// In-memory backend for tests and local development: one
/// `object_store::memory::InMemory` store per bucket.
#[derive(Default)]
pub struct InMemoryStorageBackend {
    buckets: RwLock<HashMap<String, Arc<InMemory>>>,
}

impl InMemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    async fn store(&self, bucket: &BucketName) -> Option<Arc<InMemory>> {
        self.buckets.read().await.get(bucket.as_str()).cloned()
    }

    fn not_found(bucket: &BucketName, key: &ObjectKey) -> StorageError {
        StorageError::ObjectNotFound {
            bucket: bucket.clone(),
            key: key.clone(),
        }
    }

    fn backend_error(err: object_store::Error) -> StorageError {
        StorageError::Backend {
            status: 500,
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorageBackend {
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool> {
        Ok(self.buckets.read().await.contains_key(bucket.as_str()))
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        _options: &BucketOptions,
    ) -> StorageResult<()> {
        self.buckets
            .write()
            .await
            .entry(bucket.as_str().to_string())
            .or_insert_with(|| Arc::new(InMemory::new()));
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Bytes,
        _content_type: Option<&str>,
    ) -> StorageResult<Option<String>> {
        let store = self.store(bucket).await.ok_or(StorageError::BucketNotFound {
            bucket: bucket.clone(),
        })?;

        let path = ObjectPath::from(key.as_str());
        let result = store
            .put(&path, PutPayload::from(data))
            .await
            .map_err(Self::backend_error)?;

        Ok(result.e_tag)
    }

    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Bytes> {
        let store = self
            .store(bucket)
            .await
            .ok_or_else(|| Self::not_found(bucket, key))?;

        let path = ObjectPath::from(key.as_str());
        let result = store.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => Self::not_found(bucket, key),
            _ => Self::backend_error(e),
        })?;

        result.bytes().await.map_err(Self::backend_error)
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()> {
        let store = self
            .store(bucket)
            .await
            .ok_or_else(|| Self::not_found(bucket, key))?;

        let path = ObjectPath::from(key.as_str());
        store.delete(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => Self::not_found(bucket, key),
            _ => Self::backend_error(e),
        })
    }

    async fn object_exists(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool> {
        // Missing bucket answers like a missing object, matching HEAD
        // semantics of the real backend.
        let Some(store) = self.store(bucket).await else {
            return Ok(false);
        };

        let path = ObjectPath::from(key.as_str());
        match store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Self::backend_error(e)),
        }
    }

    async fn list_objects(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectSummary>> {
        let store = self.store(bucket).await.ok_or(StorageError::BucketNotFound {
            bucket: bucket.clone(),
        })?;

        let mut stream = store.list(None);
        let mut objects = Vec::new();

        while let Some(entry) = stream.next().await {
            let meta = entry.map_err(Self::backend_error)?;
            let key =
                ObjectKey::new(meta.location.to_string()).map_err(StorageError::Validation)?;
            objects.push(ObjectSummary {
                key,
                size: meta.size,
                last_modified: meta.last_modified,
                etag: meta.e_tag,
            });
        }

        Ok(objects)
    }

    async fn copy_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Option<String>> {
        let data = self.get_object(source_bucket, source_key).await?;

        let destination = self.store(destination_bucket).await.ok_or_else(|| {
            StorageError::BucketNotFound {
                bucket: destination_bucket.clone(),
            }
        })?;

        let path = ObjectPath::from(destination_key.as_str());
        let result = destination
            .put(&path, PutPayload::from(data))
            .await
            .map_err(Self::backend_error)?;

        Ok(result.e_tag)
    }

    fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> String {
        format!("memory://{}/{}", bucket, key)
    }
}
