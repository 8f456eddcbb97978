//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::{ApiResult, BlogStore, ConfigError};
use std::sync::Arc;

/// Build the store selected by `config`
///
/// Backends compiled out by feature flags are reported as configuration
/// errors.
pub async fn connect(config: &StorageConfig) -> ApiResult<Arc<dyn BlogStore>> {
    match config.backend {
        #[cfg(feature = "in-memory")]
        StorageBackend::InMemory => Ok(Arc::new(InMemoryStore::new())),

        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| ConfigError::MissingField {
                    field: "url".to_string(),
                    context: "storage (postgres backend)".to_string(),
                })?;
            let store = PostgresStore::connect(url, config.max_connections).await?;
            Ok(Arc::new(store))
        }

        #[allow(unreachable_patterns)]
        backend => Err(ConfigError::InvalidValue {
            field: "storage.backend".to_string(),
            value: format!("{:?}", backend),
            message: "backend not enabled in this build".to_string(),
        }
        .into()),
    }
}
