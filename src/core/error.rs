//! Typed error handling for postboard
//!
//! Store and resolver code returns [`ApiError`] so callers can tell a missing
//! row from a uniqueness violation or a malformed id, instead of matching on
//! message strings.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing rows and constraint violations
//! - [`ValidationError`]: malformed client input
//! - [`StorageError`]: backend failures
//! - [`ConfigError`]: configuration parsing and schema surface checks
//!
//! # Example
//!
//! ```rust,ignore
//! match store.publish_post(42).await {
//!     Ok(post) => println!("published {}", post.id),
//!     Err(ApiError::Entity(EntityError::NotFound { .. })) => println!("no such post"),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use async_graphql::ErrorExtensions;
use serde_json::{Value, json};
use thiserror::Error;

/// The main error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Structured details attached to the error, if any
    pub fn details(&self) -> Option<Value> {
        match self {
            ApiError::Entity(EntityError::NotFound {
                entity_type,
                field,
                value,
            })
            | ApiError::Entity(EntityError::AlreadyExists {
                entity_type,
                field,
                value,
            }) => Some(json!({
                "entityType": entity_type,
                "field": field,
                "value": value,
            })),
            ApiError::Validation(ValidationError::InvalidId { value }) => {
                Some(json!({ "value": value }))
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Entity(EntityError::NotFound { .. }))
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors about the rows an operation touches
#[derive(Debug, Error)]
pub enum EntityError {
    /// A row the operation requires does not exist
    #[error("No '{entity_type}' record found with {field} '{value}'")]
    NotFound {
        entity_type: String,
        field: String,
        value: String,
    },

    /// A unique key is already taken
    #[error("A '{entity_type}' record with {field} '{value}' already exists")]
    AlreadyExists {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, field: &str, value: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn already_exists(entity_type: &str, field: &str, value: impl ToString) -> Self {
        EntityError::AlreadyExists {
            entity_type: entity_type.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors about malformed client input
#[derive(Debug, Error)]
pub enum ValidationError {
    /// An identifier that is not a base-10 integer
    #[error("Invalid id '{value}': expected a numeric identifier")]
    InvalidId { value: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidId { .. } => "INVALID_ID",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    #[error("Transaction error: {message}")]
    TransactionError { message: String },

    #[error("Failed to acquire {kind} lock: {message}")]
    LockPoisoned { kind: &'static str, message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    /// The built GraphQL schema does not expose the declared surface
    #[error("GraphQL schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// GraphQL conversion
// =============================================================================

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.error_code());
            if let Some(Value::Object(details)) = self.details() {
                for (key, value) in details {
                    if let Value::String(s) = value {
                        ext.set(key, s);
                    }
                }
            }
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for store and resolver operations
pub type ApiResult<T> = Result<T, ApiError>;
