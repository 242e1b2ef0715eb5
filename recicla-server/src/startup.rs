//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Notify};
use tracing_appender::non_blocking::WorkerGuard;

use recicla_config::ReciclaConfig;
use recicla_rest_api::create_rest_app;

use crate::services::{init_logging, rest_config, ServiceContainer};

/// Server application struct
pub struct Server {
    config: ReciclaConfig,
    services: ServiceContainer,
    _log_guard: Option<WorkerGuard>,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: ReciclaConfig) -> Result<Self> {
        // Initialize logging first
        let log_guard = init_logging(&config.logging)?;

        let services = ServiceContainer::new(&config).await?;

        Ok(Self {
            config,
            services,
            _log_guard: log_guard,
        })
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_rest_app(self.services.rest_context(), rest_config(&self.config))
    }

    /// Start the server and serve until a shutdown signal arrives
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let addr = self.config.server.socket_address();

        self.log_config_summary();

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Server listening on {}", addr);

        // Notified once the signal fires so the grace period can start
        let shutdown = Arc::new(Notify::new());
        let notifier = shutdown.clone();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            shutdown_signal().await;
            notifier.notify_one();
        });
        let mut serving = tokio::spawn(async move { server.await });

        let grace_period = self.config.server.shutdown_timeout;
        tokio::select! {
            result = &mut serving => {
                result.context("Server task failed")??;
            }
            _ = async {
                shutdown.notified().await;
                tokio::time::sleep(grace_period).await;
            } => {
                tracing::warn!(
                    "In-flight requests did not finish within {}s, forcing shutdown",
                    grace_period.as_secs()
                );
                serving.abort();
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let server = &self.config.server;
        let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };

        tracing::info!("=== Ser Recicla Server Configuration ===");
        tracing::info!("Bind Address: {}", server.socket_address());
        tracing::info!("API Prefix: {}", server.api_prefix);
        tracing::info!("Database: {}", self.config.database.url);
        tracing::info!("CORS: {}", enabled(server.enable_cors));
        tracing::info!("Request ID: {}", enabled(server.enable_request_id));
        tracing::info!("Tracing: {}", enabled(server.enable_tracing));
        tracing::info!("Secure Cookie: {}", enabled(self.config.auth.secure_cookie));

        if self.config.auth.uses_development_secret() {
            tracing::warn!("Using the development JWT secret; set RECICLA_JWT_SECRET before deploying");
        }

        tracing::info!("========================================");
    }
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
