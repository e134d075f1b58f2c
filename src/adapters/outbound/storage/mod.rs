// Storage implementations
pub mod memory;
pub mod s3;

// Re-export key types
pub use memory::InMemoryStorageBackend;
pub use s3::{S3Client, S3StorageBackend, DEFAULT_REGION};
