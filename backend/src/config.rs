//! Service configuration file support.
//!
//! Configuration is read from a TOML file and then overridden by environment
//! variables. The resulting [`AppConfig`] is passed explicitly to the
//! repository factory and the server; nothing is kept in global state.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::db::config::DatabaseConfig;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "petstore.toml";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    18080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad bind address: {}", e)))
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Find a configuration file.
    ///
    /// `PETSTORE_CONFIG` wins when set. Otherwise `petstore.toml` is searched in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var("PETSTORE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];
        search_paths.into_iter().find(|path| path.exists())
    }

    /// Apply environment overrides.
    ///
    /// # Environment Variables
    /// - `HOST`: Server host
    /// - `PORT`: Server port
    /// - `PETSTORE_DB_DRIVER`, `PETSTORE_DB_DATA_SOURCE` / `DATABASE_URL`: see
    ///   [`DatabaseConfig::apply_env`]
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                ConfigError::Invalid(format!("PORT must be a port number, got {}", port))
            })?;
        }
        self.database = self.database.apply_env();
        Ok(self)
    }

    /// Check the configuration before anything is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_addr()?;
        self.database
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Override the listener with command-line values; `None` keeps the
    /// current setting.
    pub fn with_listener(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    /// Load the located file (or defaults when none exists), apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], but an explicit `path` replaces the file
    /// search.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let located = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::locate(),
        };
        let base = match located {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        let config = base.apply_env()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            data_source = "pets.db"
            "#,
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.database.driver, "sqlite");
        assert_eq!(config.database.data_source, "pets.db");
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            driver = "memory"
            data_source = ""
            max_pool_size = 2
            connection_timeout_sec = 5
            "#,
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.driver, "memory");
        assert_eq!(config.database.max_pool_size, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = AppConfig::from_toml_str("[server\nport = 1", Path::new("broken.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_listener_overrides() {
        let config = AppConfig::default().with_listener(None, Some(9000));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);

        let config = config.with_listener(Some("127.0.0.1".to_string()), None);
        assert_eq!(config.server.bind_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_bad_host_is_invalid() {
        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
