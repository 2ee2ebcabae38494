//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use crate::config::ServerConfig;
use crate::core::store::{UploadStore, UserStore};
use crate::routes::AppState;
use crate::storage::{InMemoryUploadStore, InMemoryUserStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the tutorial API server
///
/// Stores default to in-memory implementations; the user list is seeded from
/// the configuration.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ServerConfig::from_yaml_file("server.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    user_store: Option<Arc<dyn UserStore>>,
    upload_store: Option<Arc<dyn UploadStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            user_store: None,
            upload_store: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom user store instead of the seeded in-memory list
    pub fn with_user_store(mut self, store: impl UserStore + 'static) -> Self {
        self.user_store = Some(Arc::new(store));
        self
    }

    /// Use a custom upload store
    pub fn with_upload_store(mut self, store: impl UploadStore + 'static) -> Self {
        self.upload_store = Some(Arc::new(store));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        self.config.check()?;

        let seed = self.config.seed_users.clone();
        let users = self
            .user_store
            .take()
            .unwrap_or_else(|| -> Arc<dyn UserStore> { Arc::new(InMemoryUserStore::seeded(seed)) });
        let uploads = self
            .upload_store
            .take()
            .unwrap_or_else(|| -> Arc<dyn UploadStore> { Arc::new(InMemoryUploadStore::new()) });

        Ok(AppState {
            users,
            uploads,
            upload_secret: Arc::from(self.config.upload_secret.as_str()),
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(build_router(state, custom_routes))
    }

    /// Serve on the configured bind address with graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address.clone();
        self.serve_on(&addr).await
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve_on(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::UserProfile;

    #[test]
    fn test_build_with_defaults() {
        assert!(ServerBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = ServerConfig {
            upload_secret: String::new(),
            ..ServerConfig::default()
        };
        assert!(ServerBuilder::new().with_config(config).build().is_err());
    }

    #[tokio::test]
    async fn test_state_seeds_user_list_from_config() {
        let config = ServerConfig {
            seed_users: vec![UserProfile::new("alpha", 30), UserProfile::new("beta", 40)],
            ..ServerConfig::default()
        };
        let state = ServerBuilder::new().with_config(config).build_state().unwrap();

        assert_eq!(state.users.len().await.unwrap(), 2);
        assert_eq!(&*state.upload_secret, "2026_CORE");
    }

    #[tokio::test]
    async fn test_custom_user_store_wins_over_seed() {
        let state = ServerBuilder::new()
            .with_user_store(InMemoryUserStore::new())
            .build_state()
            .unwrap();

        assert!(state.users.is_empty().await.unwrap());
    }

    #[test]
    fn test_fluent_chaining_full_pipeline() {
        let result = ServerBuilder::new()
            .with_config(ServerConfig::default())
            .with_upload_store(InMemoryUploadStore::new())
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok(), "full fluent pipeline should succeed");
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
