//! # Postboard
//!
//! A small blog backend exposed over GraphQL. Users write posts; posts start
//! as drafts and can be published, and an existing post can be reassigned to
//! another author.
//!
//! ## Features
//!
//! - **GraphQL API**: `feed`, `post`, `getUser` queries plus `createUser`,
//!   `createDraft`, `publish` and `associateUserWithPost` mutations
//! - **Pluggable storage**: in-memory store for tests and demos, PostgreSQL
//!   behind the `postgres` feature
//! - **Typed errors**: every failure carries a stable code in the GraphQL
//!   error extensions
//! - **Configuration-Based**: YAML settings with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use postboard::prelude::*;
//!
//! let config = ServerConfig::default().with_env_overrides()?;
//! let store = postboard::storage::connect(&config.storage).await?;
//!
//! ServerBuilder::new()
//!     .with_config(config)
//!     .with_shared_store(store)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{GraphQLConfig, ListenConfig, ServerConfig, StorageBackend, StorageConfig};
    pub use crate::core::{
        ApiError, ApiResult, BlogStore, ConfigError, EntityError, NewAuthoredPost, NewDraft,
        NewUser, Post, PostFilter, PostService, StorageError, User, UserService, ValidationError,
        parse_id,
    };
    pub use crate::server::{GraphQLExposure, RestExposure, ServerBuilder, ServerHost};

    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;

    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
