use tokio::net::TcpListener;

use responder_store::{FileDocumentStorage, QuestionStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Responder HTTP server over a file-backed question store.
pub struct ResponderServer {
    config: ServerConfig,
    storage: FileDocumentStorage,
}

impl ResponderServer {
    pub fn new(config: ServerConfig) -> Self {
        let storage = FileDocumentStorage::new(config.storage_path.clone());
        Self { config, storage }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> QuestionStore {
        QuestionStore::new(self.storage.clone())
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.store())
    }

    /// Create the document if configured to, then serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        if self.config.create_if_missing && self.storage.init().await? {
            tracing::info!(
                path = %self.storage.path().display(),
                "created empty question document"
            );
        }
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Responder listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
