//! Configuration loading and management

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

/// GraphQL engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLConfig {
    /// Serve the GraphQL playground at `/graphql/playground`
    #[serde(default = "default_true")]
    pub playground: bool,

    /// Maximum selection depth of a single operation
    #[serde(default)]
    pub depth_limit: Option<usize>,

    /// Maximum complexity of a single operation
    #[serde(default)]
    pub complexity_limit: Option<usize>,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            playground: true,
            depth_limit: None,
            complexity_limit: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which store implementation backs the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

/// Store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Connection URL, required for database backends
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Complete server configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,

    #[serde(default)]
    pub graphql: GraphQLConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `POSTBOARD_HOST`, `POSTBOARD_PORT` and `DATABASE_URL` from the
    /// process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// A `DATABASE_URL` switches the backend to PostgreSQL.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("POSTBOARD_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("POSTBOARD_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "POSTBOARD_PORT".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.backend = StorageBackend::Postgres;
            self.storage.url = Some(url);
        }

        Ok(self)
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "host".to_string(),
                context: "server".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: "0".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Postgres && self.storage.url.is_none() {
            return Err(ConfigError::MissingField {
                field: "url".to_string(),
                context: "storage (postgres backend)".to_string(),
            });
        }

        if self.storage.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.max_connections".to_string(),
                value: "0".to_string(),
                message: "at least one connection is required".to_string(),
            });
        }

        Ok(())
    }

    /// Host and port the server binds to
    ///
    /// The host may be an IP address or a name resolved at bind time.
    pub fn bind_address(&self) -> (&str, u16) {
        (self.server.host.as_str(), self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.server.port, 4000);
        assert!(config.graphql.playground);
        assert_eq!(config.storage.backend, StorageBackend::InMemory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ServerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ServerConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ServerConfig::from_yaml_str(
            r#"
graphql:
  depth_limit: 8
storage:
  backend: postgres
  url: postgres://localhost/blog
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.graphql.playground);
        assert_eq!(config.graphql.depth_limit, Some(8));
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.max_connections, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let config = ServerConfig::from_yaml_str("storage:\n  backend: postgres\n").unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("POSTBOARD_PORT", "8080"),
            ("DATABASE_URL", "postgres://db/blog"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::default()
            .with_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.url.as_deref(), Some("postgres://db/blog"));
    }

    #[test]
    fn test_invalid_port_override() {
        let err = ServerConfig::default()
            .with_overrides(|k| (k == "POSTBOARD_PORT").then(|| "http".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(ServerConfig::default().bind_address(), ("127.0.0.1", 4000));
    }

    #[test]
    fn test_hostname_is_accepted() {
        let config = ServerConfig::default()
            .with_overrides(|k| (k == "POSTBOARD_HOST").then(|| "localhost".to_string()))
            .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), ("localhost", 4000));
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut config = ServerConfig::default();
        config.server.host = String::new();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
    }
}
