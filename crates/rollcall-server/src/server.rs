use std::sync::Arc;

use tokio::net::TcpListener;

use rollcall_blend::Blender;
use rollcall_service::Services;
use rollcall_store::{InMemoryKvStore, KvStore, RedisKvStore};

use crate::config::{ServerConfig, StoreBackend};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The rollcall HTTP server.
pub struct RollcallServer {
    config: ServerConfig,
}

impl RollcallServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Connect the store and load the overlay and welcome page.
    pub async fn build_state(&self) -> ServerResult<AppState> {
        let store: Arc<dyn KvStore> = match &self.config.store {
            StoreBackend::Redis { url } => {
                tracing::info!(%url, "connecting to redis");
                Arc::new(RedisKvStore::connect(url).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on exit");
                Arc::new(InMemoryKvStore::new())
            }
        };

        let blender = match &self.config.overlay_path {
            Some(path) => Blender::from_overlay_path(path)?,
            None => Blender::builtin(),
        };
        tracing::debug!(?blender, "overlay ready");

        let services = Services::new(store, blender);
        Ok(match &self.config.welcome_path {
            Some(path) => AppState::with_welcome(services, tokio::fs::read_to_string(path).await?),
            None => AppState::new(services),
        })
    }

    /// Build the router over freshly built state.
    pub async fn router(&self) -> ServerResult<axum::Router> {
        let state = self.build_state().await?;
        Ok(build_router(state, self.config.max_upload_bytes))
    }

    /// Start serving requests until interrupted.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router().await?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("rollcall server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
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
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
