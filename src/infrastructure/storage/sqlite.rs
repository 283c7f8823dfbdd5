//! SQLite document storage with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::error;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

/// SQLite storage configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database connection URL, e.g. `sqlite://catalog.db`
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds, `None` keeps connections open
    pub idle_timeout_secs: Option<u64>,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://test.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: Some(600),
        }
    }
}

impl SqliteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Private in-memory database
    ///
    /// Every SQLite connection to `:memory:` opens a separate database, so the
    /// pool is pinned to one connection that never expires.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: None,
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Opens a pool against the configured database, creating the file if needed
pub async fn connect_pool(config: &SqliteConfig) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DomainError::configuration(format!("Invalid SQLite URL '{}': {}", config.url, e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    // A memory database lives only as long as its single connection
    let (max_connections, idle_timeout, max_lifetime) = if config.is_memory() {
        (1, None, None)
    } else {
        (
            config.max_connections,
            config.idle_timeout_secs.map(Duration::from_secs),
            Some(Duration::from_secs(30 * 60)),
        )
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(config.min_connections.min(max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(idle_timeout)
        .max_lifetime(max_lifetime)
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to open SQLite database: {}", e)))
}

/// SQLite storage keeping each entity as a JSON document
///
/// Rows live in a table named after the entity collection with
/// (position, data) columns; `position` preserves insertion order.
pub struct SqliteStorage<E>
where
    E: StorageEntity,
{
    pool: SqlitePool,
    _phantom: PhantomData<E>,
}

impl<E> Debug for SqliteStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("table_name", &E::COLLECTION)
            .finish()
    }
}

impl<E> SqliteStorage<E>
where
    E: StorageEntity,
{
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    fn decode(data: &str) -> Result<E, DomainError> {
        serde_json::from_str(data).map_err(|e| {
            error!(
                collection = E::COLLECTION,
                error = %e,
                "Stored document does not match entity shape"
            );
            DomainError::invalid_data_format()
        })
    }
}

#[async_trait]
impl<E> Storage<E> for SqliteStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let query = format!("SELECT data FROM {} ORDER BY position", E::COLLECTION);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin read: {}", e)))?;

        let rows = sqlx::query(&query)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list entities: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to end read: {}", e)))?;

        let mut entities = Vec::with_capacity(rows.len());

        for row in rows {
            let data: String = row
                .try_get("data")
                .map_err(|_| DomainError::invalid_data_format())?;
            entities.push(Self::decode(&data)?);
        }

        Ok(entities)
    }

    async fn insert(&self, entity: E) -> Result<E, DomainError> {
        if self.get(entity.key()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                entity.key()
            )));
        }

        let data = serde_json::to_string(&entity).map_err(|e| {
            DomainError::storage(format!("Failed to serialize entity: {}", e))
        })?;

        let query = format!("INSERT INTO {} (data) VALUES (?)", E::COLLECTION);

        sqlx::query(&query)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert entity: {}", e)))?;

        Ok(entity)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) FROM {}", E::COLLECTION);

        let count: i64 = sqlx::query_scalar(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count entities: {}", e)))?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogId, TrainedModel};
    use crate::infrastructure::storage::run_catalog_migrations;

    async fn migrated_pool() -> SqlitePool {
        let pool = connect_pool(&SqliteConfig::in_memory()).await.unwrap();
        run_catalog_migrations(&pool).await.unwrap();
        pool
    }

    fn model(id: i64, name: &str) -> TrainedModel {
        TrainedModel::new(id, name, "A dataset", "(1x2)", "MLP", "18B")
    }

    #[test]
    fn test_sqlite_config_default() {
        let config = SqliteConfig::default();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, Some(600));
        assert!(!config.is_memory());
    }

    #[test]
    fn test_sqlite_config_builder() {
        let config = SqliteConfig::new("sqlite://catalog.db")
            .with_max_connections(8)
            .with_connect_timeout(5);

        assert_eq!(config.url, "sqlite://catalog.db");
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.connect_timeout_secs, 5);
        assert!(SqliteConfig::in_memory().is_memory());
    }

    #[tokio::test]
    async fn test_insert_list_and_get() {
        let storage = SqliteStorage::<TrainedModel>::new(migrated_pool().await);

        storage.insert(model(2, "model4")).await.unwrap();
        storage.insert(model(1, "model7")).await.unwrap();

        let names: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["model4", "model7"]);

        let found = storage.get(&CatalogId::new(1)).await.unwrap().unwrap();
        assert_eq!(found.name(), "model7");
        assert_eq!(storage.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let storage = SqliteStorage::<TrainedModel>::new(migrated_pool().await);

        storage.insert(model(1, "a")).await.unwrap();
        let result = storage.insert(model(1, "b")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_float_id_document_matches() {
        let pool = migrated_pool().await;
        sqlx::query("INSERT INTO trained_models (data) VALUES (?)")
            .bind(
                r#"{"id":3.0,"name":"model8","dataset_name":"A dataset","input_shape":"(7x9x4x3)",
                "algorithm_name":"GAN","size":"18B","version_ids":[3.0,9]}"#,
            )
            .execute(&pool)
            .await
            .unwrap();

        let storage = SqliteStorage::<TrainedModel>::new(pool);
        let found = storage.get(&CatalogId::new(3)).await.unwrap().unwrap();

        assert_eq!(found.version_ids(), &[CatalogId::new(3), CatalogId::new(9)]);
    }

    #[tokio::test]
    async fn test_malformed_document_is_invalid_data() {
        let pool = migrated_pool().await;
        sqlx::query("INSERT INTO trained_models (data) VALUES ('not json')")
            .execute(&pool)
            .await
            .unwrap();

        let storage = SqliteStorage::<TrainedModel>::new(pool);
        let err = storage.list().await.unwrap_err();

        assert_eq!(err.message(), "Invalid data format");
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let pool = connect_pool(&SqliteConfig::in_memory()).await.unwrap();
        let storage = SqliteStorage::<TrainedModel>::new(pool);

        assert!(matches!(
            storage.count().await,
            Err(DomainError::Storage { .. })
        ));
    }
}
