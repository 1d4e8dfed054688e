//! Application configuration
//!
//! Defaults, then an optional YAML file, then `CAREGRAPH_*` environment
//! overrides, then validation.

use crate::estimator::Efficacy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which graph store to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Bolt,
    Embedded,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bolt" | "neo4j" => Ok(Backend::Bolt),
            "embedded" | "memory" => Ok(Backend::Embedded),
            other => Err(ConfigError::Invalid(format!("unknown backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    /// Bolt URI
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Database name (None = server default)
    pub database: Option<String>,
    /// Connection pool size
    pub max_connections: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Bolt,
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            database: None,
            max_connections: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    Forest,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub kind: EstimatorKind,
    /// Number of stumps in the ensemble
    pub trees: usize,
    /// Synthetic training set size
    pub samples: usize,
    /// Holdout share used to report accuracy
    pub test_fraction: f64,
    /// RNG seed (None = fresh entropy)
    pub seed: Option<u64>,
    /// Label returned by the fixed estimator
    pub fixed_label: Efficacy,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            kind: EstimatorKind::Forest,
            trees: 100,
            samples: 1000,
            test_fraction: 0.2,
            seed: None,
            fixed_label: Efficacy::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub http: HttpConfig,
    pub estimator: EstimatorConfig,
    /// Load the sample data when the web server starts
    pub seed_on_start: bool,
    pub create_indexes_on_start: bool,
    /// Used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            http: HttpConfig::default(),
            estimator: EstimatorConfig::default(),
            seed_on_start: true,
            create_indexes_on_start: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `path` if given, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `CAREGRAPH_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("CAREGRAPH_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(uri) = lookup("CAREGRAPH_NEO4J_URI") {
            self.store.uri = uri;
        }
        if let Some(user) = lookup("CAREGRAPH_NEO4J_USER") {
            self.store.user = user;
        }
        if let Some(password) = lookup("CAREGRAPH_NEO4J_PASSWORD") {
            self.store.password = password;
        }
        if let Some(database) = lookup("CAREGRAPH_NEO4J_DATABASE") {
            self.store.database = Some(database).filter(|db| !db.is_empty());
        }
        if let Some(addr) = lookup("CAREGRAPH_HTTP_ADDR") {
            match addr.rsplit_once(':') {
                Some((host, port)) => {
                    self.http.port = port.parse().map_err(|_| {
                        ConfigError::Invalid(format!("bad port in CAREGRAPH_HTTP_ADDR: {}", addr))
                    })?;
                    self.http.address = host.to_string();
                }
                None => self.http.address = addr,
            }
        }
        if let Some(level) = lookup("CAREGRAPH_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(flag) = lookup("CAREGRAPH_SEED_ON_START") {
            self.seed_on_start = parse_flag(&flag)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == Backend::Bolt && self.store.uri.trim().is_empty() {
            return Err(ConfigError::Invalid("store.uri must not be empty".to_string()));
        }
        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid("store.max_connections must be positive".to_string()));
        }
        if self.estimator.trees == 0 {
            return Err(ConfigError::Invalid("estimator.trees must be positive".to_string()));
        }
        if self.estimator.samples < 2 {
            return Err(ConfigError::Invalid(
                "estimator.samples must be at least 2 to hold out a test set".to_string(),
            ));
        }
        let fraction = self.estimator.test_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "estimator.test_fraction must be in (0, 1), got {}",
                fraction
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!("expected a boolean, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.uri, "bolt://localhost:7687");
        assert_eq!(config.store.user, "neo4j");
        assert_eq!(config.store.password, "password");
        assert!(config.seed_on_start);
        assert!(config.create_indexes_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "
store:
  backend: embedded
estimator:
  kind: fixed
  fixed_label: 0
seed_on_start: false
";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.store.backend, Backend::Embedded);
        assert_eq!(config.store.user, "neo4j");
        assert_eq!(config.estimator.kind, EstimatorKind::Fixed);
        assert_eq!(config.estimator.fixed_label, Efficacy::Low);
        assert_eq!(config.estimator.trees, 100);
        assert!(!config.seed_on_start);
        assert_eq!(config.http.port, 5000);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http:\n  port: 8080\nlog_level: debug").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("CAREGRAPH_BACKEND", "embedded"),
                ("CAREGRAPH_NEO4J_URI", "bolt://db:7687"),
                ("CAREGRAPH_NEO4J_DATABASE", "health"),
                ("CAREGRAPH_HTTP_ADDR", "0.0.0.0:9000"),
                ("CAREGRAPH_SEED_ON_START", "no"),
            ]))
            .unwrap();
        assert_eq!(config.store.backend, Backend::Embedded);
        assert_eq!(config.store.uri, "bolt://db:7687");
        assert_eq!(config.store.database.as_deref(), Some("health"));
        assert_eq!(config.http.address, "0.0.0.0");
        assert_eq!(config.http.port, 9000);
        assert!(!config.seed_on_start);
    }

    #[test]
    fn test_bad_overrides_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("CAREGRAPH_BACKEND", "redis")])).is_err());
        assert!(config
            .apply_env(env(&[("CAREGRAPH_HTTP_ADDR", "localhost:http")]))
            .is_err());
        assert!(config
            .apply_env(env(&[("CAREGRAPH_SEED_ON_START", "maybe")]))
            .is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        config.estimator.test_fraction = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.store.uri = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.estimator.trees = 0;
        assert!(config.validate().is_err());

        // one sample cannot be split into train and holdout
        let mut config = AppConfig::default();
        config.estimator.samples = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.estimator.samples = 2;
        assert!(config.validate().is_ok());
    }
}
