//! Relational behaviour storage
//!
//! Behaviours and their parameters live in two tables joined by a foreign key
//! from `function_parameters.behaviour_id` to `behaviours.id`. Deleting a
//! behaviour row cascades to its parameters.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::domain::storage::Storage;
use crate::domain::{Behaviour, CatalogId, DomainError, FunctionParameter};

/// SQLite storage for behaviours with relationally owned parameters
#[derive(Debug, Clone)]
pub struct SqliteBehaviourStorage {
    pool: SqlitePool,
}

impl SqliteBehaviourStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn behaviour_from_row(row: &SqliteRow) -> Result<Behaviour, DomainError> {
        let decode = |_| DomainError::invalid_data_format();

        Ok(Behaviour::new(
            row.try_get::<i64, _>("id").map_err(decode)?,
            row.try_get::<String, _>("name").map_err(decode)?,
            row.try_get::<String, _>("description").map_err(decode)?,
            row.try_get::<String, _>("function_reference").map_err(decode)?,
        ))
    }

    fn parameter_from_row(row: &SqliteRow) -> Result<FunctionParameter, DomainError> {
        let decode = |_| DomainError::invalid_data_format();

        Ok(FunctionParameter::new(
            row.try_get::<String, _>("name").map_err(decode)?,
            row.try_get::<String, _>("type").map_err(decode)?,
        ))
    }
}

#[async_trait]
impl Storage<Behaviour> for SqliteBehaviourStorage {
    async fn list(&self) -> Result<Vec<Behaviour>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin read: {}", e)))?;

        let behaviour_rows = sqlx::query(
            "SELECT id, name, description, function_reference FROM behaviours ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list behaviours: {}", e)))?;

        let parameter_rows = sqlx::query(
            "SELECT behaviour_id, name, type FROM function_parameters \
             ORDER BY behaviour_id, position",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list parameters: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to end read: {}", e)))?;

        let mut parameters: HashMap<i64, Vec<FunctionParameter>> = HashMap::new();

        for row in &parameter_rows {
            let owner: i64 = row
                .try_get("behaviour_id")
                .map_err(|_| DomainError::invalid_data_format())?;
            parameters
                .entry(owner)
                .or_default()
                .push(Self::parameter_from_row(row)?);
        }

        behaviour_rows
            .iter()
            .map(|row| -> Result<Behaviour, DomainError> {
                let behaviour = Self::behaviour_from_row(row)?;
                let owned = parameters
                    .remove(&behaviour.id().value())
                    .unwrap_or_default();
                Ok(behaviour.with_parameters(owned))
            })
            .collect()
    }

    async fn get(&self, key: &CatalogId) -> Result<Option<Behaviour>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin read: {}", e)))?;

        let row = sqlx::query(
            "SELECT id, name, description, function_reference FROM behaviours WHERE id = ?",
        )
        .bind(key.value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get behaviour: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let parameter_rows = sqlx::query(
            "SELECT name, type FROM function_parameters WHERE behaviour_id = ? ORDER BY position",
        )
        .bind(key.value())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get parameters: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to end read: {}", e)))?;

        let parameters = parameter_rows
            .iter()
            .map(Self::parameter_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self::behaviour_from_row(&row)?.with_parameters(parameters)))
    }

    async fn insert(&self, behaviour: Behaviour) -> Result<Behaviour, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin insert: {}", e)))?;

        sqlx::query(
            "INSERT INTO behaviours (id, name, description, function_reference) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(behaviour.id().value())
        .bind(behaviour.name())
        .bind(behaviour.description())
        .bind(behaviour.function_reference())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                DomainError::conflict(format!(
                    "Behaviour with id '{}' already exists",
                    behaviour.id()
                ))
            } else {
                DomainError::storage(format!("Failed to insert behaviour: {}", e))
            }
        })?;

        for (position, parameter) in behaviour.function_parameters().iter().enumerate() {
            sqlx::query(
                "INSERT INTO function_parameters (behaviour_id, position, name, type) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(behaviour.id().value())
            .bind(position as i64)
            .bind(parameter.name())
            .bind(parameter.param_type())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert parameter: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit behaviour: {}", e)))?;

        Ok(behaviour)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM behaviours")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count behaviours: {}", e)))?;

        Ok(count as usize)
    }
}
