use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use reqwest::{header, Method, Response, StatusCode};
use serde::Deserialize;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::ObjectSummary,
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::{BucketOptions, StorageBackend},
};

use super::client::{S3Client, DEFAULT_REGION};

/// Storage backend speaking the S3 REST API through an [`S3Client`].
///
/// Bucket and object operations map one-to-one onto single requests;
/// retry, backoff and multipart orchestration are out of scope.
pub struct S3StorageBackend {
    client: S3Client,
}

impl S3StorageBackend {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    fn transport_error(err: reqwest::Error) -> StorageError {
        StorageError::Unavailable {
            message: err.to_string(),
        }
    }

    async fn status_error(
        bucket: &BucketName,
        operation: &str,
        response: Response,
    ) -> StorageError {
        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return StorageError::AccessDenied {
                bucket: bucket.clone(),
                operation: operation.to_string(),
            };
        }
        let message = response.text().await.unwrap_or_default();
        StorageError::Backend {
            status: status.as_u16(),
            message,
        }
    }

    fn etag_header(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"').to_string())
    }
}

#[async_trait]
impl StorageBackend for S3StorageBackend {
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool> {
        let response = self
            .client
            .request(Method::HEAD, &self.client.bucket_url(bucket))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status().is_success() {
            Ok(true)
        } else if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(Self::status_error(bucket, "bucket_exists", response).await)
        }
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        options: &BucketOptions,
    ) -> StorageResult<()> {
        let region = options.region.as_deref().unwrap_or(self.client.region());

        let mut request = self
            .client
            .request(Method::PUT, &self.client.bucket_url(bucket));

        if let Some(acl) = &options.acl {
            request = request.header("x-amz-acl", acl);
        }
        if options.object_lock_enabled {
            request = request.header("x-amz-bucket-object-lock-enabled", "true");
        }

        // us-east-1 must not be sent as a location constraint
        let body = if region == DEFAULT_REGION {
            String::new()
        } else {
            format!(
                "<CreateBucketConfiguration><LocationConstraint>{}</LocationConstraint></CreateBucketConfiguration>",
                region
            )
        };

        let response = request
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(bucket, "create_bucket", response).await)
        }
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<Option<String>> {
        let mut request = self
            .client
            .request(Method::PUT, &self.client.object_url(bucket, key));
        if let Some(ct) = content_type {
            request = request.header(header::CONTENT_TYPE, ct);
        }

        let response = request
            .body(data)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status().is_success() {
            Ok(Self::etag_header(&response))
        } else {
            Err(Self::status_error(bucket, "put_object", response).await)
        }
    }

    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Bytes> {
        let mut response = self
            .client
            .request(Method::GET, &self.client.object_url(bucket, key))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::ObjectNotFound {
                bucket: bucket.clone(),
                key: key.clone(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::status_error(bucket, "get_object", response).await);
        }

        // Accumulate the body chunk by chunk into one buffer; the whole
        // object must fit in memory.
        let mut data = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(Self::transport_error)? {
            data.extend_from_slice(&chunk);
        }
        Ok(data.freeze())
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()> {
        let response = self
            .client
            .request(Method::DELETE, &self.client.object_url(bucket, key))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else if response.status() == StatusCode::NOT_FOUND {
            Err(StorageError::ObjectNotFound {
                bucket: bucket.clone(),
                key: key.clone(),
            })
        } else {
            Err(Self::status_error(bucket, "delete_object", response).await)
        }
    }

    async fn object_exists(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool> {
        let response = self
            .client
            .request(Method::HEAD, &self.client.object_url(bucket, key))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status().is_success() {
            Ok(true)
        } else if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(Self::status_error(bucket, "object_exists", response).await)
        }
    }

    async fn list_objects(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectSummary>> {
        let url = format!("{}?list-type=2", self.client.bucket_url(bucket));
        let response = self
            .client
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::BucketNotFound {
                bucket: bucket.clone(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::status_error(bucket, "list_objects", response).await);
        }

        let body = response.text().await.map_err(Self::transport_error)?;
        let listing: ListBucketResult = from_str(&body).map_err(|e| StorageError::Decode {
            message: format!("invalid ListBucketResult: {}", e),
        })?;

        listing
            .contents
            .into_iter()
            .map(|entry| entry.into_summary())
            .collect()
    }

    async fn copy_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Option<String>> {
        let response = self
            .client
            .request(
                Method::PUT,
                &self.client.object_url(destination_bucket, destination_key),
            )
            .header(
                "x-amz-copy-source",
                self.client.copy_source(source_bucket, source_key),
            )
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::ObjectNotFound {
                bucket: source_bucket.clone(),
                key: source_key.clone(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::status_error(destination_bucket, "copy_object", response).await);
        }

        let body = response.text().await.map_err(Self::transport_error)?;
        let etag = from_str::<CopyObjectResult>(&body)
            .ok()
            .and_then(|r| r.e_tag)
            .map(|t| t.trim_matches('"').to_string());
        Ok(etag)
    }

    fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> String {
        self.client.object_url(bucket, key)
    }
}

#[derive(Debug, Deserialize)]
struct ListBucketResult {
    #[serde(rename = "Contents", default)]
    contents: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "LastModified")]
    last_modified: String,
    #[serde(rename = "ETag")]
    e_tag: Option<String>,
}

impl ListEntry {
    fn into_summary(self) -> StorageResult<ObjectSummary> {
        let key = ObjectKey::new(self.key)?;
        let last_modified = DateTime::parse_from_rfc3339(&self.last_modified)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StorageError::Decode {
                message: format!("invalid LastModified in listing: {}", e),
            })?;
        Ok(ObjectSummary {
            key,
            size: self.size,
            last_modified,
            etag: self.e_tag.map(|t| t.trim_matches('"').to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CopyObjectResult {
    #[serde(rename = "ETag")]
    e_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_bucket_result() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <ListBucketResult>
                <Name>docs</Name>
                <KeyCount>2</KeyCount>
                <Contents>
                    <Key>a.txt</Key>
                    <LastModified>2024-03-01T10:15:30.000Z</LastModified>
                    <ETag>&quot;9a0364b9e99bb480dd25e1f0284c8555&quot;</ETag>
                    <Size>12</Size>
                </Contents>
                <Contents>
                    <Key>reports/q1.pdf</Key>
                    <LastModified>2024-03-02T08:00:00.000Z</LastModified>
                    <ETag>&quot;d41d8cd98f00b204e9800998ecf8427e&quot;</ETag>
                    <Size>2048</Size>
                </Contents>
            </ListBucketResult>"#;

        let listing: ListBucketResult = from_str(xml).unwrap();
        assert_eq!(listing.contents.len(), 2);

        let first = listing.contents.into_iter().next().unwrap();
        let summary = first.into_summary().unwrap();
        assert_eq!(summary.key.as_str(), "a.txt");
        assert_eq!(summary.size, 12);
        assert_eq!(
            summary.etag.as_deref(),
            Some("9a0364b9e99bb480dd25e1f0284c8555")
        );
    }

    #[test]
    fn parses_empty_listing() {
        let xml = r#"<ListBucketResult><Name>empty</Name><KeyCount>0</KeyCount></ListBucketResult>"#;
        let listing: ListBucketResult = from_str(xml).unwrap();
        assert!(listing.contents.is_empty());
    }

    #[test]
    fn parses_copy_object_result() {
        let xml = r#"<CopyObjectResult>
            <LastModified>2024-03-01T10:15:30.000Z</LastModified>
            <ETag>&quot;abc123&quot;</ETag>
        </CopyObjectResult>"#;
        let result: CopyObjectResult = from_str(xml).unwrap();
        assert_eq!(result.e_tag.as_deref(), Some("\"abc123\""));
    }
}
