//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, RestExposure};
use super::host::ServerHost;
use crate::config::ServerConfig;
use crate::core::BlogStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the blog API server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(config)
///     .with_store(InMemoryStore::new())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    store: Option<Arc<dyn BlogStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder with the default configuration and no store
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            store: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the store (required)
    pub fn with_store(mut self, store: impl BlogStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared store, such as the one returned by
    /// [`storage::connect`](crate::storage::connect)
    pub fn with_shared_store(mut self, store: Arc<dyn BlogStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Add routes served next to the API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(self) -> Result<ServerHost> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;

        Ok(ServerHost::new(self.config, store))
    }

    /// Build the complete router: health routes, GraphQL routes and custom
    /// routes, wrapped in request tracing
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);

        let rest_router = RestExposure::build_router(host.clone(), custom_routes)?;
        let graphql_router = GraphQLExposure::build_router(host)?;

        Ok(rest_router
            .merge(graphql_router)
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// The configuration is validated first, then the server binds to
    /// `server.host:server.port` and runs until SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let listener = bind_listener(&self.config).await?;
        let app = self.build()?;

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

/// Validate `config` and bind its host and port, resolving host names
async fn bind_listener(config: &ServerConfig) -> Result<TcpListener> {
    config.validate()?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    Ok(listener)
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
