use std::time::Duration;

use reqwest::Client;

use crate::domain::value_objects::{BucketName, ObjectKey};

/// Region used when the configuration does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Long-lived handle for a path-style S3-compatible endpoint.
///
/// Constructed once from endpoint and static credentials; no network
/// call happens at construction time.
#[derive(Clone, Debug)]
pub struct S3Client {
    endpoint: String,
    region: String,
    access_key: String,
    secret_key: String,
    http: Client,
}

impl S3Client {
    pub fn new(endpoint: &str, access_key: &str, secret_key: &str, region: Option<&str>) -> Self {
        // Create reqwest client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        S3Client {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            region: region.unwrap_or(DEFAULT_REGION).to_string(),
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            http,
        }
    }

    /// The region this client is configured for
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Path-style URL of a bucket: `{endpoint}/{bucket}`
    pub fn bucket_url(&self, bucket: &BucketName) -> String {
        format!("{}/{}", self.endpoint, bucket)
    }

    /// Path-style URL of an object, with each key segment percent-encoded
    pub fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            bucket,
            encode_key_path(key.as_str())
        )
    }

    /// Source header value for a server-side copy: `/{bucket}/{key}`
    pub fn copy_source(&self, bucket: &BucketName, key: &ObjectKey) -> String {
        format!("/{}/{}", bucket, encode_key_path(key.as_str()))
    }

    /// Start a request with the client's credentials attached
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.access_key, Some(&self.secret_key))
    }
}

fn encode_key_path(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> S3Client {
        S3Client::new("http://localhost:9000/", "minioadmin", "minioadmin", None)
    }

    #[test]
    fn urls_are_path_style() {
        let bucket = BucketName::new("docs").unwrap();
        let key = ObjectKey::new("reports/q1 final.pdf").unwrap();

        assert_eq!(client().bucket_url(&bucket), "http://localhost:9000/docs");
        assert_eq!(
            client().object_url(&bucket, &key),
            "http://localhost:9000/docs/reports/q1%20final.pdf"
        );
    }

    #[test]
    fn copy_source_is_bucket_prefixed() {
        let bucket = BucketName::new("public").unwrap();
        let key = ObjectKey::new("a.txt").unwrap();
        assert_eq!(client().copy_source(&bucket, &key), "/public/a.txt");
    }

    #[test]
    fn default_region_applies() {
        assert_eq!(client().region(), DEFAULT_REGION);
    }
}
