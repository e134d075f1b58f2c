pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - value objects, models and errors
pub use domain::{
    BucketName,
    CopyReceipt,
    Existence,
    ObjectKey,
    ObjectSummary,
    StorageError,
    StorageResult,
    UploadReceipt,
    ValidationError,
};

// Port types - the storage backend seam
pub use ports::{BucketOptions, StorageBackend};

// The gateway facade
pub use services::{ObjectStorageGateway, DEFAULT_BUCKET};

// Application factory and configuration
pub use app::{
    create_gateway_from_env, create_in_memory_gateway, create_minio_gateway, GatewayBuilder,
    GatewayConfig, GatewayError, StorageBackendKind,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    InMemoryStorageBackend, S3Client, S3StorageBackend, DEFAULT_REGION,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_gateway, create_minio_gateway, BucketName, Existence, GatewayBuilder,
        ObjectKey, ObjectStorageGateway, StorageBackend, StorageBackendKind, StorageError,
        DEFAULT_BUCKET,
    };
}
