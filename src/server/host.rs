//! Server host for transport-agnostic API exposure
//!
//! The host holds the state every exposure needs: the validated
//! configuration and the store. Exposures turn it into routers.

use crate::config::ServerConfig;
use crate::core::BlogStore;
use std::sync::Arc;

/// Host context shared by all exposures
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(config, store));
/// let rest_app = RestExposure::build_router(host.clone(), vec![])?;
/// let graphql_app = GraphQLExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn BlogStore>,
}

impl ServerHost {
    pub fn new(config: ServerConfig, store: Arc<dyn BlogStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
