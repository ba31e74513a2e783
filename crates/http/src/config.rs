//! Application configuration loaded from the environment

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Configuration loaded from environment variables
pub trait AppConfigTrait: Sized {
    /// Load configuration from the process environment
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Where each setting comes from
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvVar(String),
    Nested,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                field: "format".to_string(),
                value: s.to_string(),
                expected: "compact, pretty, or json".to_string(),
            }),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "modelize".to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "host".to_string(),
                value: addr,
                expected: "an IP address".to_string(),
            })
    }
}

impl AppConfigTrait for AppConfig {
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(AppConfig {
            name: get_or_default(lookup, "APP_NAME", "modelize"),
            server: ServerConfig::from_lookup(lookup)?,
            logging: LoggingConfig::from_lookup(lookup)?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "name".to_string(),
                reason: "App name cannot be empty".to_string(),
            });
        }

        self.server.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "name".to_string(),
            ConfigSource::EnvVar("APP_NAME".to_string()),
        );
        sources.insert("server".to_string(), ConfigSource::Nested);
        sources.insert("logging".to_string(), ConfigSource::Nested);
        sources
    }
}

impl AppConfigTrait for ServerConfig {
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(lookup, "SERVER_HOST", "0.0.0.0");
        let port = get_or_default(lookup, "SERVER_PORT", "3000");
        let port = port.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            field: "port".to_string(),
            value: port,
            expected: "valid port number (0-65535)".to_string(),
        })?;

        Ok(ServerConfig { host, port })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "host".to_string(),
                reason: "Host cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "port".to_string(),
                reason: "Port cannot be 0".to_string(),
            });
        }

        self.socket_addr().map(|_| ())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "host".to_string(),
            ConfigSource::EnvVar("SERVER_HOST".to_string()),
        );
        sources.insert(
            "port".to_string(),
            ConfigSource::EnvVar("SERVER_PORT".to_string()),
        );
        sources
    }
}

impl AppConfigTrait for LoggingConfig {
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let level = get_or_default(lookup, "LOG_LEVEL", "info");
        let format = get_or_default(lookup, "LOG_FORMAT", "compact").parse()?;
        Ok(LoggingConfig { level, format })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "level".to_string(),
                value: self.level.clone(),
                expected: "trace, debug, info, warn, or error".to_string(),
            });
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "level".to_string(),
            ConfigSource::EnvVar("LOG_LEVEL".to_string()),
        );
        sources.insert(
            "format".to_string(),
            ConfigSource::EnvVar("LOG_FORMAT".to_string()),
        );
        sources
    }
}

fn get_or_default(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}")]
    MissingEnvVar { var: String },

    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_app_config_from_lookup() {
        let lookup = lookup_from(&[
            ("APP_NAME", "products-api"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
        ]);

        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.name, "products-api");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.server.socket_addr().unwrap().to_string(),
            "127.0.0.1:8080"
        );
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(&lookup_from(&[])).unwrap();

        assert_eq!(config.name, "modelize");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_invalid_port() {
        let error = AppConfig::from_lookup(&lookup_from(&[("SERVER_PORT", "http")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { ref field, .. } if field == "port"));
    }

    #[test]
    fn test_invalid_format() {
        let error = AppConfig::from_lookup(&lookup_from(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { ref field, .. } if field == "format"));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));

        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_sources() {
        let config = AppConfig::default();
        let sources = config.config_sources();
        assert_eq!(
            sources.get("name"),
            Some(&ConfigSource::EnvVar("APP_NAME".to_string()))
        );
        assert_eq!(sources.get("server"), Some(&ConfigSource::Nested));
    }
}
