//! Application lifecycle: connect, serve, shut down.

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::routes;
use crate::state::AppState;
use crate::store::Gateway;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

pub struct App {
    config: AppConfig,
    gateway: Gateway,
    state: AppState,
}

impl App {
    /// Open the pool (and apply migrations when `AUTO_MIGRATE` is set).
    pub async fn connect(config: AppConfig) -> Result<Self, StartupError> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(crate::store::StoreError::from)?;
        let gateway = Gateway::new(pool);
        gateway.ping().await?;
        tracing::info!(max_connections = config.max_connections, "database pool ready");

        if config.auto_migrate {
            gateway.migrate().await?;
            tracing::info!("migrations applied");
        }

        let state = AppState::from_gateway(gateway.clone());
        Ok(App {
            config,
            gateway,
            state,
        })
    }

    pub fn router(&self) -> Router {
        routes::build(
            self.state.clone(),
            Some(self.gateway.clone()),
            self.config.body_limit,
        )
    }

    /// Serve until Ctrl-C / SIGTERM, let in-flight requests finish, then close the pool.
    pub async fn serve(self) -> Result<(), StartupError> {
        let listener = TcpListener::bind(self.config.listen_addr).await?;
        tracing::info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        self.shutdown().await;
        Ok(())
    }

    pub async fn shutdown(self) {
        tracing::info!("closing database pool");
        self.gateway.close().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
