mod gateway;

pub use gateway::{ObjectStorageGateway, DEFAULT_BUCKET};
