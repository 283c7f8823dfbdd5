//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Read contract over one catalog collection
///
/// `insert` exists only for seeding; nothing on the request path writes.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves all entities in insertion order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Retrieves the first entity whose key matches
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|entity| entity.key() == key))
    }

    /// Appends an entity, returns error if the key is already taken
    async fn insert(&self, entity: E) -> Result<E, DomainError>;

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
