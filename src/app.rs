use std::sync::Arc;

use crate::{
    adapters::outbound::storage::{InMemoryStorageBackend, S3Client, S3StorageBackend},
    services::ObjectStorageGateway,
};

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackendKind {
    InMemory,
    MinIO {
        endpoint: String,
        access_key: String,
        secret_key: String,
        region: Option<String>,
    },
}

/// Configuration for the gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub backend: StorageBackendKind,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::InMemory,
        }
    }
}

/// Builder wiring a gateway to its storage backend.
///
/// Construction is purely local; no network call is made until the
/// first operation on the gateway.
pub struct GatewayBuilder {
    config: GatewayConfig,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_backend(mut self, backend: StorageBackendKind) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn build(self) -> Result<ObjectStorageGateway, GatewayError> {
        match self.config.backend {
            StorageBackendKind::InMemory => {
                let backend = Arc::new(InMemoryStorageBackend::new());
                Ok(ObjectStorageGateway::new(
                    backend,
                    crate::adapters::outbound::storage::DEFAULT_REGION,
                ))
            }
            StorageBackendKind::MinIO {
                endpoint,
                access_key,
                secret_key,
                region,
            } => {
                if endpoint.is_empty() {
                    return Err(GatewayError::Configuration {
                        message: "endpoint must not be empty".to_string(),
                    });
                }
                let client =
                    S3Client::new(&endpoint, &access_key, &secret_key, region.as_deref());
                let region = client.region().to_string();
                let backend = Arc::new(S3StorageBackend::new(client));
                Ok(ObjectStorageGateway::new(backend, region))
            }
        }
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Create an in-memory gateway for testing and development
pub fn create_in_memory_gateway() -> Result<ObjectStorageGateway, GatewayError> {
    GatewayBuilder::new()
        .with_backend(StorageBackendKind::InMemory)
        .build()
}

/// Create a MinIO-backed gateway
pub fn create_minio_gateway(
    endpoint: String,
    access_key: String,
    secret_key: String,
) -> Result<ObjectStorageGateway, GatewayError> {
    GatewayBuilder::new()
        .with_backend(StorageBackendKind::MinIO {
            endpoint,
            access_key,
            secret_key,
            region: None,
        })
        .build()
}

/// Create a gateway from environment variables
pub fn create_gateway_from_env() -> Result<ObjectStorageGateway, GatewayError> {
    let endpoint = std::env::var("MINIO_ENDPOINT").map_err(|_| GatewayError::Configuration {
        message: "MINIO_ENDPOINT environment variable required".to_string(),
    })?;
    let access_key = std::env::var("MINIO_ACCESS_KEY").map_err(|_| GatewayError::Configuration {
        message: "MINIO_ACCESS_KEY environment variable required".to_string(),
    })?;
    let secret_key = std::env::var("MINIO_SECRET_KEY").map_err(|_| GatewayError::Configuration {
        message: "MINIO_SECRET_KEY environment variable required".to_string(),
    })?;
    let region = std::env::var("MINIO_REGION").ok();

    GatewayBuilder::new()
        .with_backend(StorageBackendKind::MinIO {
            endpoint,
            access_key,
            secret_key,
            region,
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_memory_gateway() {
        assert!(create_in_memory_gateway().is_ok());
    }

    #[test]
    fn builds_minio_gateway_without_network() {
        let gateway = create_minio_gateway(
            "http://localhost:9000".to_string(),
            "minioadmin".to_string(),
            "minioadmin".to_string(),
        )
        .unwrap();

        // URL construction works straight after build, no call needed
        let url = gateway.object_url(Some("a.txt"), Some("docs"));
        assert_eq!(url, "http://localhost:9000/docs/a.txt");
    }

    #[test]
    fn rejects_empty_endpoint() {
        let result = GatewayBuilder::new()
            .with_backend(StorageBackendKind::MinIO {
                endpoint: String::new(),
                access_key: "k".to_string(),
                secret_key: "s".to_string(),
                region: None,
            })
            .build();
        assert!(result.is_err());
    }
}
