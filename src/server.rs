//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::scheduler::InternalTicker;
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Validates configuration
    /// 3. Initializes database connection pool
    /// 4. Creates application state
    /// 5. Starts the internal ticker when configured
    /// 6. Binds to configured address
    /// 7. Starts the HTTP server with graceful shutdown
    ///
    /// # Returns
    /// Returns Ok(()) on successful shutdown, or error on startup failure
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Database connection pool initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        // Log application startup information
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        // Log server configuration
        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            keep_alive_timeout = %self.settings.server.keep_alive_timeout,
            "Server configuration loaded"
        );

        // Log database configuration (without sensitive URL details)
        tracing::info!(
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            auto_migrate = %self.settings.database.auto_migrate,
            "Database configuration loaded"
        );

        // Log auth configuration (without sensitive secret)
        tracing::info!(
            audience = %self.settings.auth.audience,
            leeway_seconds = %self.settings.auth.leeway_seconds,
            secret_configured = %(!self.settings.auth.jwt_secret.is_empty()),
            "Auth configuration loaded"
        );

        // Log scheduler configuration
        tracing::info!(
            timezone = %self.settings.scheduler.timezone,
            tolerance_minutes = %self.settings.scheduler.tolerance_minutes,
            internal_ticker = %self.settings.scheduler.internal_ticker,
            "Scheduler configuration loaded"
        );

        // Log gateway configuration
        tracing::info!(
            base_url = %self.settings.gateway.base_url,
            timeout_seconds = %self.settings.gateway.timeout_seconds,
            "Gateway configuration loaded"
        );

        // Validate the full configuration before touching the database
        self.settings.validate().map_err(|e| {
            tracing::error!(error = %e, "Configuration validation failed");
            anyhow::anyhow!("Configuration validation failed: {}", e)
        })?;
        tracing::info!("Configuration validated");

        // Apply pending migrations when configured to do so
        if self.settings.database.auto_migrate {
            let applied = run_pending_migrations(&self.settings.database.url).await?;
            if applied.is_empty() {
                tracing::info!("Database is up to date, no migrations applied");
            } else {
                tracing::info!(count = applied.len(), "Applied pending migrations");
            }
        }

        // Initialize database connection pool
        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("Database connection pool initialized");

        // Create application state with services
        let state = AppState::new(
            pool,
            self.settings.auth.clone(),
            &self.settings.gateway,
            &self.settings.scheduler,
        )?;
        tracing::info!("Application state created");

        // Start the internal ticker when the deployment is not driven by
        // an external cron calling the trigger endpoint
        let ticker = if self.settings.scheduler.internal_ticker {
            let ticker = InternalTicker::new(
                Arc::clone(&state.evaluator),
                self.settings.scheduler.tick_cron.clone(),
            )
            .await?;
            ticker.start().await?;
            tracing::info!(cron = %self.settings.scheduler.tick_cron, "Internal ticker started");
            Some(ticker)
        } else {
            None
        };

        // Create router with all routes and middleware
        let router = create_router(state, Environment::from_env());
        tracing::info!("Router configured");

        // Bind to the configured address
        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        // Start the server with graceful shutdown
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(ticker) = ticker {
            ticker.stop().await?;
            tracing::info!("Internal ticker stopped");
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// This function returns when either signal is received, allowing
/// the server to perform graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
