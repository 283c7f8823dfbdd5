//! In-memory document storage implementation

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

/// Thread-safe in-memory storage holding entities as JSON documents
///
/// Records are decoded on every read, so ids pass through the same numeric
/// normalization a persisted document would. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    documents: RwLock<Vec<Value>>,
    _phantom: PhantomData<E>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    /// Creates storage pre-populated with raw documents
    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            documents: RwLock::new(documents),
            _phantom: PhantomData,
        }
    }

    fn decode(document: &Value) -> Result<E, DomainError> {
        E::deserialize(document).map_err(|e| {
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
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let documents = self.documents.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        documents.iter().map(Self::decode).collect()
    }

    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let documents = self.documents.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        for document in documents.iter() {
            let entity = Self::decode(document)?;

            if entity.key() == key {
                return Ok(Some(entity));
            }
        }

        Ok(None)
    }

    async fn insert(&self, entity: E) -> Result<E, DomainError> {
        let document = serde_json::to_value(&entity).map_err(|e| {
            DomainError::storage(format!("Failed to serialize entity: {}", e))
        })?;

        let mut documents = self.documents.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        for existing in documents.iter() {
            if Self::decode(existing)?.key() == entity.key() {
                return Err(DomainError::conflict(format!(
                    "Entity with key '{}' already exists",
                    entity.key()
                )));
            }
        }

        documents.push(document);
        Ok(entity)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let documents = self.documents.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Behaviour, CatalogId};
    use serde_json::json;

    fn behaviour(id: i64, name: &str) -> Behaviour {
        Behaviour::new(id, name, "desc", "f").with_parameter("min", "float")
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let storage: InMemoryStorage<Behaviour> = InMemoryStorage::new();
        let b = behaviour(1, "Threshold");

        storage.insert(b.clone()).await.unwrap();

        let result = storage.get(&CatalogId::new(1)).await.unwrap();
        assert_eq!(result, Some(b));
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let storage: InMemoryStorage<Behaviour> = InMemoryStorage::new();

        storage.insert(behaviour(1, "A")).await.unwrap();
        let result = storage.insert(behaviour(1, "B")).await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let storage: InMemoryStorage<Behaviour> = InMemoryStorage::new();

        storage.insert(behaviour(3, "C")).await.unwrap();
        storage.insert(behaviour(1, "A")).await.unwrap();
        storage.insert(behaviour(2, "B")).await.unwrap();

        let names: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(storage.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_float_id_matches_integer_key() {
        let storage: InMemoryStorage<Behaviour> = InMemoryStorage::with_documents(vec![json!({
            "id": 2.0,
            "name": "Normalization",
            "description": "Scales data to a specific range",
            "function_reference": "normalization_function",
            "function_parameters": [{"name": "min", "type": "float"}]
        })]);

        let found = storage.get(&CatalogId::new(2)).await.unwrap().unwrap();
        assert_eq!(found.name(), "Normalization");
    }

    #[tokio::test]
    async fn test_duplicate_ids_first_match_wins() {
        let storage: InMemoryStorage<Behaviour> = InMemoryStorage::with_documents(vec![
            serde_json::to_value(behaviour(1, "First")).unwrap(),
            serde_json::to_value(behaviour(1, "Second")).unwrap(),
        ]);

        let found = storage.get(&CatalogId::new(1)).await.unwrap().unwrap();
        assert_eq!(found.name(), "First");
    }

    #[tokio::test]
    async fn test_malformed_document_is_invalid_data() {
        let storage: InMemoryStorage<Behaviour> =
            InMemoryStorage::with_documents(vec![json!({"id": "one", "name": 5})]);

        let err = storage.get(&CatalogId::new(1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));
        assert_eq!(err.message(), "Invalid data format");

        assert!(storage.list().await.is_err());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage: InMemoryStorage<Behaviour> = InMemoryStorage::new();
        storage.insert(behaviour(1, "A")).await.unwrap();

        assert!(storage.get(&CatalogId::new(999)).await.unwrap().is_none());
    }
}
