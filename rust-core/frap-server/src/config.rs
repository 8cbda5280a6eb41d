//! Configuration loading from `frap.toml`.
//!
//! Every key is optional; missing sections and keys take the defaults
//! below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! max_body_size = 1048576
//! shutdown_timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! json = false
//!
//! [database]
//! path = "frap.db"
//! ```

use frap_core::ServerConfig;
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but make no sense
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Largest accepted request body in bytes
    pub max_body_size: usize,
    /// Seconds to wait for open connections on shutdown
    pub shutdown_timeout_secs: u64,
    /// HTTP keep-alive
    pub keep_alive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_size: 1024 * 1024,
            shutdown_timeout_secs: 30,
            keep_alive: true,
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// `[database]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file for feedback submissions; none disables storage
    pub path: Option<PathBuf>,
}

/// Whole `frap.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrapConfig {
    /// HTTP server settings
    pub server: ServerSection,
    /// Log output settings
    pub logging: LoggingSection,
    /// Storage settings
    pub database: DatabaseSection,
}

impl FrapConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file can't be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text can't be parsed or validated.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.server.max_body_size == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_size must be greater than 0".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level is empty".to_string()));
        }
        Ok(())
    }

    /// `host:port` as a socket address
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the host is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("server.host is not an IP address: {}", self.server.host)))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Settings for [`frap_core::Server`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the host is not an IP address.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        Ok(ServerConfig {
            address: self.socket_addr()?,
            keep_alive: self.server.keep_alive,
            shutdown_timeout: Duration::from_secs(self.server.shutdown_timeout_secs),
            max_body_size: self.server.max_body_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FrapConfig::from_toml("").unwrap();
        assert_eq!(config, FrapConfig::default());
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = FrapConfig::from_toml(
            r#"
            [server]
            port = 9090

            [logging]
            json = true

            [database]
            path = "feedback.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.database.path, Some(PathBuf::from("feedback.db")));
    }

    #[test]
    fn test_server_config() {
        let config = FrapConfig::from_toml(
            "[server]\nhost = \"127.0.0.1\"\nshutdown_timeout_secs = 5\nmax_body_size = 512\n",
        )
        .unwrap();
        let server = config.server_config().unwrap();
        assert_eq!(server.address.to_string(), "127.0.0.1:8000");
        assert_eq!(server.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(server.max_body_size, 512);
        assert!(server.keep_alive);
    }

    #[test]
    fn test_invalid_values() {
        let err = FrapConfig::from_toml("[server]\nhost = \"localhost\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = FrapConfig::from_toml("[server]\nmax_body_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = FrapConfig::from_toml("[server]\nport = \"eighty\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();
        let config = FrapConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");

        let err = FrapConfig::load(Path::new("/nonexistent/frap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
