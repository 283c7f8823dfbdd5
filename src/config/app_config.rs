use serde::Deserialize;

use crate::domain::{Dataset, DomainError};
use crate::infrastructure::storage::{SqliteConfig, StorageConfig, StorageType};

use super::ServiceProfile;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Falls back to the profile's port when unset
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `sqlite`; falls back to the profile's backend when unset
    pub backend: Option<String>,
    pub sqlite_url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub dataset: Option<Dataset>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: None,
            sqlite_url: "sqlite://catalog.db".to_string(),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn port_for(&self, profile: ServiceProfile) -> u16 {
        self.server.port.unwrap_or_else(|| profile.default_port())
    }

    pub fn dataset_for(&self, profile: ServiceProfile) -> Dataset {
        self.seed.dataset.unwrap_or_else(|| profile.default_dataset())
    }

    pub fn storage_for(&self, profile: ServiceProfile) -> Result<StorageConfig, DomainError> {
        let backend = match self.storage.backend.as_deref() {
            Some(name) => StorageType::from_str(name).ok_or_else(|| {
                DomainError::configuration(format!("Unknown storage backend '{}'", name))
            })?,
            None => profile.default_backend(),
        };

        Ok(match backend {
            StorageType::InMemory => StorageConfig::in_memory(),
            StorageType::Sqlite => StorageConfig::sqlite(
                SqliteConfig::new(&self.storage.sqlite_url)
                    .with_max_connections(self.storage.max_connections),
            ),
        })
    }
}
