//! Process lifecycle: build storage, bind, serve until a shutdown signal.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::create_router;
use crate::config::{DatabaseConfig, Settings, StorageBackend};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Serves the racket API until Ctrl+C or SIGTERM.
    ///
    /// Fails when the database cannot be reached or migrated (PostgreSQL
    /// backend), or when the listen address cannot be bound.
    pub async fn run(self) -> anyhow::Result<()> {
        let Settings {
            application,
            server,
            storage,
            database,
            logger,
        } = &self.settings;

        tracing::info!(
            name = %application.name,
            version = %application.version,
            backend = %storage.backend,
            log_level = %logger.level,
            "Starting raquetas service"
        );

        let state = match storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("In-memory storage selected; rackets are lost on restart");
                AppState::in_memory()
            }
            StorageBackend::Postgres => postgres_state(database).await?,
        };

        if storage.seed_demo_data {
            let seeded = state.services.raquetas.seed_demo_data().await?;
            tracing::info!(seeded, "Demo catalogue seeded");
        }

        let address = server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, %address, "Cannot bind listen address");
            anyhow::anyhow!("cannot bind {}: {}", address, e)
        })?;
        tracing::info!(%address, "Accepting connections");

        axum::serve(listener, create_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Stopped");
        Ok(())
    }
}

async fn postgres_state(database: &DatabaseConfig) -> anyhow::Result<AppState> {
    // the URL may embed credentials, so it is never logged
    tracing::info!(
        max_connections = database.max_connections,
        min_connections = database.min_connections,
        connection_timeout_secs = database.connection_timeout,
        auto_migrate = database.auto_migrate,
        "Connecting to PostgreSQL"
    );

    if database.auto_migrate {
        let applied = run_pending_migrations(&database.url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");
    }

    let pool = establish_async_connection_pool(database).await?;
    tracing::info!("PostgreSQL pool ready");
    Ok(AppState::new(pool))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
///
/// A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    let source = tokio::select! {
        _ = ctrl_c => "ctrl-c",
        _ = sigterm => "sigterm",
    };
    tracing::info!(signal = source, "Shutting down gracefully");
}
