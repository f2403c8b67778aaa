//! csvbucket REST API Server Binary
//!
//! # Environment Variables
//!
//! - `S3_BUCKET`: S3 bucket name (required)
//! - `S3_KEY`: Object key of the CSV document (default: datos.csv)
//! - `AWS_REGION`: AWS region (optional)
//! - `AWS_ENDPOINT_URL`: MinIO/S3 endpoint (optional)
//! - `API_PORT`: HTTP port (default: 8000)
//! - `SHUTDOWN_TIMEOUT_SECS`: Graceful shutdown timeout (default: 30)
//! - `RUST_LOG`: Log level (default: info)
//!
//! Credentials are taken from the environment the process runs in
//! (`AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, web identity, or the
//! instance role).
//!
//! # Example
//!
//! ```bash
//! export S3_BUCKET=personas
//! export AWS_ENDPOINT_URL=http://localhost:9000
//! export AWS_ACCESS_KEY_ID=minioadmin
//! export AWS_SECRET_ACCESS_KEY=minioadmin
//! cargo run --bin api
//! ```

use std::sync::Arc;

use csvbucket_api::shutdown::{serve_with_shutdown, BoxError, GracefulShutdown};
use csvbucket_api::{create_router, AppState, ServiceConfig};
use csvbucket_storage::RecordStore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Setup logging
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("csvbucket REST API starting...");

    // Missing S3_BUCKET aborts startup here
    let config = ServiceConfig::from_env()?;

    info!("Configuration:");
    info!("  Bucket: {}", config.store.bucket);
    info!("  Key: {}", config.store.key);
    info!(
        "  Region: {}",
        config.store.region.as_deref().unwrap_or("(from environment)")
    );
    if let Some(endpoint) = &config.store.endpoint {
        info!("  Endpoint: {}", endpoint);
    }
    info!("  API Port: {}", config.port);

    let store: Arc<dyn RecordStore> = Arc::new(config.store.open()?);
    info!("✓ Object store client ready");

    let router = create_router(AppState::new(store));

    serve_with_shutdown(router, config.port, GracefulShutdown::default()).await?;

    Ok(())
}
