//! Database migrations infrastructure

use sqlx::sqlite::SqlitePool;

use crate::domain::DomainError;

/// SQLite migrator recording applied versions in `_migrations`
#[derive(Debug)]
pub struct SqliteMigrator {
    pool: SqlitePool,
}

impl SqliteMigrator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Runs a single migration, skipping it when already applied
    ///
    /// Returns true when the migration was applied by this call.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        let applied: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM _migrations WHERE version = ?")
                .bind(migration.version)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration status: {}", e))
                })?;

        if applied > 0 {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::storage(format!("Failed to begin migration transaction: {}", e))
        })?;

        sqlx::query(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to commit migration {}: {}",
                migration.version, e
            ))
        })?;

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to get migration version: {}", e))
            })?;

        Ok(version)
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    /// Single SQL statement applied by the migration
    pub up: &'static str,
}

impl Migration {
    pub const fn new(version: i64, description: &'static str, up: &'static str) -> Self {
        Self {
            version,
            description,
            up,
        }
    }
}

/// Schema of the persisted catalog
pub fn catalog_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create built-in model types document table",
            r#"
            CREATE TABLE IF NOT EXISTS built_in_model_types (
                position INTEGER PRIMARY KEY AUTOINCREMENT,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        ),
        Migration::new(
            2,
            "Create trained models document table",
            r#"
            CREATE TABLE IF NOT EXISTS trained_models (
                position INTEGER PRIMARY KEY AUTOINCREMENT,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        ),
        Migration::new(
            3,
            "Create behaviours table",
            r#"
            CREATE TABLE IF NOT EXISTS behaviours (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                function_reference TEXT NOT NULL
            )
            "#,
        ),
        Migration::new(
            4,
            "Create function parameters table",
            r#"
            CREATE TABLE IF NOT EXISTS function_parameters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                behaviour_id INTEGER NOT NULL REFERENCES behaviours(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                type TEXT NOT NULL
            )
            "#,
        ),
        Migration::new(
            5,
            "Index function parameters by owning behaviour",
            r#"
            CREATE INDEX IF NOT EXISTS idx_function_parameters_behaviour
                ON function_parameters(behaviour_id, position)
            "#,
        ),
    ]
}

/// Runs all pending catalog migrations, returning how many were applied
pub async fn run_catalog_migrations(pool: &SqlitePool) -> Result<usize, DomainError> {
    let migrator = SqliteMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in catalog_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}
