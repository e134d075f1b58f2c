use storage_gateway::{create_minio_gateway, Existence};

// Note: These tests require MinIO to be running and configured via
// environment variables:
// - MINIO_ENDPOINT (default: http://localhost:9000)
// - MINIO_ACCESS_KEY (default: minioadmin)
// - MINIO_SECRET_KEY (default: minioadmin)

fn endpoint() -> String {
    std::env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string())
}

fn access_key() -> String {
    std::env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string())
}

fn secret_key() -> String {
    std::env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string())
}

#[tokio::test]
#[ignore = "requires MinIO server to be running"]
async fn minio_upload_download_delete() {
    let gateway = create_minio_gateway(endpoint(), access_key(), secret_key()).unwrap();

    let contents = b"Hello from MinIO!";
    let source = std::env::temp_dir().join(format!("minio-live-{}.txt", std::process::id()));
    tokio::fs::write(&source, contents).await.unwrap();

    let receipt = gateway
        .upload(Some("minio-live.txt"), &source, Some("gateway-live-test"))
        .await
        .unwrap();
    assert_eq!(receipt.size, contents.len() as u64);

    let url = gateway.object_url(Some("minio-live.txt"), Some("gateway-live-test"));
    assert!(url.contains("gateway-live-test"));
    assert!(url.contains("minio-live.txt"));

    let data = gateway
        .get_object(Some("minio-live.txt"), Some("gateway-live-test"))
        .await
        .unwrap();
    assert_eq!(data.as_ref(), contents);

    gateway
        .delete_object(Some("minio-live.txt"), Some("gateway-live-test"))
        .await
        .unwrap();

    let existence = gateway
        .object_exists(Some("minio-live.txt"), Some("gateway-live-test"), None)
        .await
        .unwrap();
    assert_eq!(existence, Existence::Absent);

    tokio::fs::remove_file(source).await.unwrap();
}

#[tokio::test]
#[ignore = "requires MinIO server to be running"]
async fn minio_copy_from_public_bucket() {
    let gateway = create_minio_gateway(endpoint(), access_key(), secret_key()).unwrap();

    let source = std::env::temp_dir().join(format!("minio-copy-{}.txt", std::process::id()));
    tokio::fs::write(&source, b"copy source").await.unwrap();

    gateway
        .upload(Some("copy-source.txt"), &source, None)
        .await
        .unwrap();

    let receipt = gateway
        .copy("copy-dest.txt", "copy-source.txt", None, None)
        .await
        .unwrap()
        .expect("source was just uploaded");
    assert_eq!(receipt.key.as_str(), "copy-dest.txt");

    let missing = gateway
        .copy("nowhere.txt", "does-not-exist.txt", None, None)
        .await
        .unwrap();
    assert!(missing.is_none());

    gateway.delete_object(Some("copy-source.txt"), None).await.unwrap();
    gateway.delete_object(Some("copy-dest.txt"), None).await.unwrap();
    tokio::fs::remove_file(source).await.unwrap();
}
