mod backend;
mod client;

pub use backend::S3StorageBackend;
pub use client::{S3Client, DEFAULT_REGION};
