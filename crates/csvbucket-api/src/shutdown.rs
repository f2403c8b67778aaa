//! Graceful Shutdown
//!
//! Serves the router until SIGINT or SIGTERM, then lets in-flight requests
//! finish. A request caught mid read-modify-write either completes its
//! overwrite or never issues it; the drain is bounded by a timeout after which
//! remaining connections are dropped.
//!
//! ## Environment Variables
//!
//! - `SHUTDOWN_TIMEOUT_SECS`: Maximum time to wait for in-flight requests (default: 30)

use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for graceful shutdown behavior
#[derive(Debug, Clone)]
pub struct GracefulShutdown {
    /// Maximum time to wait for in-flight requests to complete
    pub timeout: Duration,
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        let timeout_secs = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        Self::with_timeout(Duration::from_secs(timeout_secs))
    }
}

impl GracefulShutdown {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Shutdown signal type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Received SIGINT (Ctrl+C)
    SigInt,
    /// Received SIGTERM
    SigTerm,
    /// Shutdown requested by the caller
    Manual,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SigInt => write!(f, "SIGINT (Ctrl+C)"),
            Self::SigTerm => write!(f, "SIGTERM"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Completes when SIGINT or SIGTERM is received
pub async fn shutdown_signal() -> ShutdownSignal {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        ShutdownSignal::SigInt
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
        ShutdownSignal::SigTerm
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<ShutdownSignal>();

    tokio::select! {
        signal = ctrl_c => signal,
        signal = terminate => signal,
    }
}

/// Bind `0.0.0.0:port` and serve until SIGINT/SIGTERM
pub async fn serve_with_shutdown(
    router: axum::Router,
    port: u16,
    config: GracefulShutdown,
) -> Result<(), BoxError> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("REST API server listening on {}", addr);
    tracing::info!("   Swagger UI: http://localhost:{}/swagger-ui", port);
    tracing::info!("   Health: http://localhost:{}/health", port);
    tracing::info!("   Graceful shutdown timeout: {:?}", config.timeout);

    serve_until(listener, router, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `signal` resolves
pub async fn serve_until<F>(
    listener: TcpListener,
    router: axum::Router,
    config: GracefulShutdown,
    signal: F,
) -> Result<(), BoxError>
where
    F: Future<Output = ShutdownSignal> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let signal = signal.await;
                tracing::info!("Received {}, initiating graceful shutdown...", signal);
                let _ = signalled_tx.send(());
            })
            .await
    });

    tokio::select! {
        // Server ended on its own (bind loss, fatal I/O)
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = signalled_rx => {}
    }

    match tokio::time::timeout(config.timeout, &mut server).await {
        Ok(result) => {
            result??;
            tracing::info!("Server shut down gracefully");
        }
        Err(_) => {
            tracing::warn!(
                "In-flight requests still running after {:?}, aborting",
                config.timeout
            );
            server.abort();
        }
    }

    Ok(())
}
