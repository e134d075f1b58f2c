use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storage_gateway::{Existence, GatewayBuilder, ObjectKey, StorageBackendKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "storage-gateway-cli")]
#[command(about = "CLI for an S3-compatible object storage gateway", long_about = None)]
struct Cli {
    /// MinIO/S3 endpoint URL
    #[arg(long, env = "MINIO_ENDPOINT", default_value = "http://localhost:9000")]
    endpoint: String,

    /// Access key
    #[arg(long, env = "MINIO_ACCESS_KEY", default_value = "minioadmin")]
    access_key: String,

    /// Secret key
    #[arg(long, env = "MINIO_SECRET_KEY", default_value = "minioadmin")]
    secret_key: String,

    /// Region
    #[arg(long, env = "MINIO_REGION", default_value = "us-east-1")]
    region: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a local file
    Put {
        /// Object key
        key: String,
        /// File path to upload
        file: String,
        /// Bucket name
        #[arg(short, long)]
        bucket: Option<String>,
    },

    /// Download an object
    Get {
        /// Object key
        key: String,
        /// Output file path (defaults to the key's file name)
        #[arg(short, long)]
        output: Option<String>,
        /// Bucket name
        #[arg(short, long)]
        bucket: Option<String>,
    },

    /// Print the public URL of an object
    Url {
        /// Object key
        key: String,
        /// Bucket name
        #[arg(short, long)]
        bucket: Option<String>,
    },

    /// List the objects of a bucket
    List {
        /// Bucket name
        #[arg(short, long)]
        bucket: Option<String>,
    },

    /// Check whether an object exists
    Exists {
        /// Object key
        key: String,
        /// Bucket name
        #[arg(short, long)]
        bucket: Option<String>,
        /// Check under this original key instead
        #[arg(long)]
        original: Option<String>,
    },

    /// Delete an object
    Delete {
        /// Object key
        key: String,
        /// Bucket name
        #[arg(short, long)]
        bucket: Option<String>,
    },

    /// Copy an object from the public bucket
    Copy {
        /// Destination key
        destination: String,
        /// Source key (resolved in the public bucket)
        source: String,
        /// Destination bucket name
        #[arg(short, long)]
        bucket: Option<String>,
        /// Check the source under this original key instead
        #[arg(long)]
        original: Option<String>,
    },
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let gateway = GatewayBuilder::new()
        .with_backend(StorageBackendKind::MinIO {
            endpoint: cli.endpoint.clone(),
            access_key: cli.access_key.clone(),
            secret_key: cli.secret_key.clone(),
            region: Some(cli.region.clone()),
        })
        .build()
        .context("Failed to build gateway")?;

    match cli.command {
        Commands::Put { key, file, bucket } => {
            let receipt = gateway
                .upload(Some(&key), &file, bucket.as_deref())
                .await
                .with_context(|| format!("Failed to upload {}", file))?;
            println!(
                "stored {}/{} ({} bytes)",
                receipt.bucket, receipt.key, receipt.size
            );
            if let Some(etag) = receipt.etag {
                println!("etag: {}", etag);
            }
        }

        Commands::Get {
            key,
            output,
            bucket,
        } => {
            let data = gateway.get_object(Some(&key), bucket.as_deref()).await?;
            let output = match output {
                Some(path) => path,
                None => ObjectKey::new(key.clone())?.file_name().to_string(),
            };
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output))?;
            println!("wrote {} bytes to {}", data.len(), output);
        }

        Commands::Url { key, bucket } => {
            println!("{}", gateway.object_url(Some(&key), bucket.as_deref()));
        }

        Commands::List { bucket } => {
            let objects = gateway.list_all(bucket.as_deref()).await?;
            let entries: Vec<_> = objects
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "key": o.key.as_str(),
                        "size": o.size,
                        "last_modified": o.last_modified.to_rfc3339(),
                        "etag": o.etag,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }

        Commands::Exists {
            key,
            bucket,
            original,
        } => {
            let existence = gateway
                .object_exists(Some(&key), bucket.as_deref(), original.as_deref())
                .await?;
            match existence {
                Existence::Present => println!("present"),
                Existence::Absent => println!("absent"),
                Existence::Unspecified => println!("unspecified"),
            }
        }

        Commands::Delete { key, bucket } => {
            gateway.delete_object(Some(&key), bucket.as_deref()).await?;
            println!("deleted {}", key);
        }

        Commands::Copy {
            destination,
            source,
            bucket,
            original,
        } => {
            let result = gateway
                .copy(&destination, &source, bucket.as_deref(), original.as_deref())
                .await?;
            match result {
                Some(receipt) => {
                    println!("copied {} to {}/{}", source, receipt.bucket, receipt.key)
                }
                None => println!("source object {} does not exist", source),
            }
        }
    }

    Ok(())
}
