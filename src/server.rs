//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::cache::CacheManager;
use crate::config::settings::Settings;
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

/// Namespace for the response cache keys.
const RESPONSE_CACHE_NAME: &str = "responses";

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Applies migrations when `database.auto_migrate` is set
    /// 3. Initializes the database pool and the response cache
    /// 4. Binds to the configured address and serves with graceful shutdown
    ///
    /// # Errors
    /// - Migration, pool or cache initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %settings.application.environment,
            "Application starting"
        );

        tracing::info!(
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );

        tracing::info!(
            enabled = %settings.cache.enabled,
            backend = ?settings.cache.backend,
            "Cache configuration loaded"
        );

        // Never log the secret itself
        tracing::info!(
            access_token_expiration = %settings.jwt.access_token_expiration,
            secret_configured = %(!settings.jwt.secret.is_empty()),
            "JWT configuration loaded"
        );

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let cache = CacheManager::new(&settings.cache, RESPONSE_CACHE_NAME)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to initialize cache");
                anyhow::anyhow!("Failed to initialize cache: {}", e)
            })?;

        let state = AppState::new(pool, cache, settings.jwt.clone());
        let router = create_router(state);

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed the failure is logged and that signal is
/// ignored; the other one still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
