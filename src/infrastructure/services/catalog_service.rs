//! Catalog service - read operations shared by every transport

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::BEHAVIOUR_NOT_FOUND;
use crate::domain::{Behaviour, CatalogId, DomainError, ModelCatalog};
use crate::infrastructure::storage::CatalogStores;

/// Trait for catalog queries (for dependency injection)
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync + Debug {
    /// Both model collections in insertion order
    async fn list_models(&self) -> Result<ModelCatalog, DomainError>;

    /// All behaviours with their parameters
    async fn list_behaviours(&self) -> Result<Vec<Behaviour>, DomainError>;

    /// Resolves a behaviour from an unparsed identifier
    async fn get_behaviour(&self, raw_id: &str) -> Result<Behaviour, DomainError>;

    /// Checks that every store answers
    async fn check_ready(&self) -> Result<(), DomainError>;
}

/// Catalog service backed by the catalog stores
#[derive(Debug, Clone)]
pub struct CatalogService {
    stores: CatalogStores,
}

impl CatalogService {
    pub fn new(stores: CatalogStores) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn list_models(&self) -> Result<ModelCatalog, DomainError> {
        let built_in = self.stores.built_in.list().await?;
        let trained_models = self.stores.trained_models.list().await?;

        Ok(ModelCatalog {
            built_in,
            trained_models,
        })
    }

    async fn list_behaviours(&self) -> Result<Vec<Behaviour>, DomainError> {
        self.stores.behaviours.list().await
    }

    async fn get_behaviour(&self, raw_id: &str) -> Result<Behaviour, DomainError> {
        let id = CatalogId::parse(raw_id)?;
        debug!(id = %id, "Looking up behaviour");

        self.stores
            .behaviours
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(BEHAVIOUR_NOT_FOUND))
    }

    async fn check_ready(&self) -> Result<(), DomainError> {
        self.stores.built_in.count().await?;
        self.stores.trained_models.count().await?;
        self.stores.behaviours.count().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::domain::storage::mock::MockStorage;
    use crate::domain::{CatalogDataset, Dataset};
    use crate::infrastructure::services::CatalogSeeder;
    use crate::infrastructure::storage::{InMemoryStorage, StorageFactory};

    async fn seeded_service() -> CatalogService {
        let stores = StorageFactory::create_in_memory();
        CatalogSeeder::new(CatalogDataset::load(Dataset::Catalog))
            .seed(&stores)
            .await
            .unwrap();
        CatalogService::new(stores)
    }

    #[tokio::test]
    async fn test_list_models() {
        let catalog = seeded_service().await.list_models().await.unwrap();

        assert_eq!(catalog.built_in.len(), 5);
        assert_eq!(catalog.trained_models.len(), 8);
        assert_eq!(catalog.built_in[0].name(), "Diffusion Models");
    }

    #[tokio::test]
    async fn test_list_behaviours() {
        let behaviours = seeded_service().await.list_behaviours().await.unwrap();

        let names: Vec<&str> = behaviours.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["Threshold", "Normalization"]);
    }

    #[tokio::test]
    async fn test_get_behaviour() {
        let behaviour = seeded_service().await.get_behaviour("2").await.unwrap();

        assert_eq!(behaviour.name(), "Normalization");
        assert_eq!(behaviour.function_parameters().len(), 3);
    }

    #[tokio::test]
    async fn test_get_behaviour_invalid_id() {
        let service = seeded_service().await;

        for raw in ["abc", "", " 1", "1.5"] {
            let err = service.get_behaviour(raw).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument { .. }), "{raw:?}");
            assert_eq!(err.message(), "Invalid ID");
        }
    }

    #[tokio::test]
    async fn test_get_behaviour_not_found() {
        let service = seeded_service().await;

        for raw in ["999", "0", "-1"] {
            let err = service.get_behaviour(raw).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { .. }));
            assert_eq!(err.message(), "Behaviour not found");
        }
    }

    #[tokio::test]
    async fn test_get_behaviour_signed_id() {
        let behaviour = seeded_service().await.get_behaviour("+1").await.unwrap();
        assert_eq!(behaviour.name(), "Threshold");
    }

    #[tokio::test]
    async fn test_float_stored_id_resolves() {
        let mut stores = StorageFactory::create_in_memory();
        stores.behaviours = Arc::new(InMemoryStorage::<Behaviour>::with_documents(vec![json!({
            "id": 2.0,
            "name": "Normalization",
            "description": "Scales data",
            "function_reference": "normalization_function",
            "function_parameters": []
        })]));

        let behaviour = CatalogService::new(stores).get_behaviour("2").await.unwrap();
        assert_eq!(behaviour.id(), CatalogId::new(2));
    }

    #[tokio::test]
    async fn test_invalid_data_is_internal() {
        let mut stores = StorageFactory::create_in_memory();
        stores.behaviours = Arc::new(MockStorage::new().with_invalid_data());
        let service = CatalogService::new(stores);

        let err = service.get_behaviour("1").await.unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));
        assert_eq!(err.message(), "Invalid data format");

        // An unparseable id is rejected before the store is read
        let err = service.get_behaviour("abc").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut stores = StorageFactory::create_in_memory();
        stores.built_in = Arc::new(MockStorage::new().with_error("connection lost"));
        let service = CatalogService::new(stores);

        assert!(matches!(
            service.list_models().await,
            Err(DomainError::Storage { .. })
        ));
        assert!(service.check_ready().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let service = CatalogService::new(StorageFactory::create_in_memory());

        assert_eq!(service.list_models().await.unwrap(), ModelCatalog::default());
        assert!(service.list_behaviours().await.unwrap().is_empty());
        assert!(service.check_ready().await.is_ok());
    }
}
