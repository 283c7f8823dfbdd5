//! Storage factory for runtime storage selection

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::{Behaviour, BuiltInModelType, DomainError, TrainedModel};

use super::in_memory::InMemoryStorage;
use super::migrations::run_catalog_migrations;
use super::relational::SqliteBehaviourStorage;
use super::sqlite::{connect_pool, SqliteConfig, SqliteStorage};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory document storage
    InMemory,
    /// SQLite storage
    Sqlite,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "sqlite" | "sqlite3" | "sql" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// SQLite storage configuration
    Sqlite(SqliteConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn sqlite(config: SqliteConfig) -> Self {
        Self::Sqlite(config)
    }

    pub fn sqlite_url(url: impl Into<String>) -> Self {
        Self::Sqlite(SqliteConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Sqlite(_) => StorageType::Sqlite,
        }
    }
}

/// The three catalog collections, each behind its own storage
#[derive(Debug, Clone)]
pub struct CatalogStores {
    pub built_in: Arc<dyn Storage<BuiltInModelType>>,
    pub trained_models: Arc<dyn Storage<TrainedModel>>,
    pub behaviours: Arc<dyn Storage<Behaviour>>,
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the catalog stores for the configured backend
    ///
    /// For SQLite the database is opened and migrated here; any failure is
    /// returned to the caller, which must not start serving.
    pub async fn create_catalog_stores(
        config: &StorageConfig,
    ) -> Result<CatalogStores, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory catalog storage");
                Ok(Self::create_in_memory())
            }
            StorageConfig::Sqlite(sqlite_config) => {
                info!(url = %sqlite_config.url, "Opening SQLite catalog storage");
                let pool = connect_pool(sqlite_config).await?;
                let applied = run_catalog_migrations(&pool).await?;
                info!(applied, "Catalog migrations complete");

                Ok(CatalogStores {
                    built_in: Arc::new(SqliteStorage::<BuiltInModelType>::new(pool.clone())),
                    trained_models: Arc::new(SqliteStorage::<TrainedModel>::new(pool.clone())),
                    behaviours: Arc::new(SqliteBehaviourStorage::new(pool)),
                })
            }
        }
    }

    /// Creates empty in-memory stores
    pub fn create_in_memory() -> CatalogStores {
        CatalogStores {
            built_in: Arc::new(InMemoryStorage::<BuiltInModelType>::new()),
            trained_models: Arc::new(InMemoryStorage::<TrainedModel>::new()),
            behaviours: Arc::new(InMemoryStorage::<Behaviour>::new()),
        }
    }
}
