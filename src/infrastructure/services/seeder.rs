//! Catalog seeder - one-time population of the catalog stores

use tracing::{debug, info};

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::{CatalogDataset, DomainError};
use crate::infrastructure::storage::CatalogStores;

/// Records inserted per entity kind by one seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub built_in: usize,
    pub trained_models: usize,
    pub behaviours: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.built_in + self.trained_models + self.behaviours
    }
}

/// Writes a fixed dataset into empty stores
#[derive(Debug)]
pub struct CatalogSeeder {
    dataset: CatalogDataset,
}

impl CatalogSeeder {
    pub fn new(dataset: CatalogDataset) -> Self {
        Self { dataset }
    }

    /// Seeds every kind whose store is still empty
    ///
    /// A kind that already holds records is left untouched.
    pub async fn seed(&self, stores: &CatalogStores) -> Result<SeedReport, DomainError> {
        self.dataset
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let report = SeedReport {
            built_in: seed_collection(stores.built_in.as_ref(), &self.dataset.built_in).await?,
            trained_models: seed_collection(
                stores.trained_models.as_ref(),
                &self.dataset.trained_models,
            )
            .await?,
            behaviours: seed_collection(stores.behaviours.as_ref(), &self.dataset.behaviours)
                .await?,
        };

        info!(
            built_in = report.built_in,
            trained_models = report.trained_models,
            behaviours = report.behaviours,
            "Catalog seeding complete"
        );

        Ok(report)
    }
}

async fn seed_collection<E>(store: &dyn Storage<E>, records: &[E]) -> Result<usize, DomainError>
where
    E: StorageEntity + 'static,
{
    let existing = store.count().await?;

    if existing > 0 {
        debug!(collection = E::COLLECTION, existing, "Collection already seeded");
        return Ok(0);
    }

    for record in records {
        store.insert(record.clone()).await?;
    }

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::storage::mock::MockStorage;
    use crate::domain::{Behaviour, Dataset};
    use crate::infrastructure::storage::{SqliteConfig, StorageConfig, StorageFactory};

    #[tokio::test]
    async fn test_seed_empty_stores() {
        let stores = StorageFactory::create_in_memory();
        let seeder = CatalogSeeder::new(CatalogDataset::load(Dataset::Catalog));

        let report = seeder.seed(&stores).await.unwrap();

        assert_eq!(report.built_in, 5);
        assert_eq!(report.trained_models, 8);
        assert_eq!(report.behaviours, 2);
        assert_eq!(report.total(), 15);
    }

    #[tokio::test]
    async fn test_seed_twice_inserts_nothing() {
        let stores = StorageFactory::create_in_memory();
        let seeder = CatalogSeeder::new(CatalogDataset::load(Dataset::Catalog));

        seeder.seed(&stores).await.unwrap();
        let second = seeder.seed(&stores).await.unwrap();

        assert_eq!(second, SeedReport::default());
        assert_eq!(stores.behaviours.count().await.unwrap(), 2);
        assert_eq!(stores.trained_models.count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_seed_sqlite_is_idempotent() {
        let stores =
            StorageFactory::create_catalog_stores(&StorageConfig::sqlite(SqliteConfig::in_memory()))
                .await
                .unwrap();
        let seeder = CatalogSeeder::new(CatalogDataset::load(Dataset::Sample));

        let first = seeder.seed(&stores).await.unwrap();
        let second = seeder.seed(&stores).await.unwrap();

        assert_eq!(first.behaviours, 2);
        assert_eq!(second.total(), 0);

        let names: Vec<String> = stores
            .behaviours
            .list()
            .await
            .unwrap()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["SampleBehaviour1", "SampleBehaviour2"]);
    }

    #[tokio::test]
    async fn test_seed_skips_only_populated_kinds() {
        let mut stores = StorageFactory::create_in_memory();
        stores.behaviours = Arc::new(
            MockStorage::new().with_entity(Behaviour::new(7, "Existing", "Kept", "kept_function")),
        );

        let report = CatalogSeeder::new(CatalogDataset::load(Dataset::Catalog))
            .seed(&stores)
            .await
            .unwrap();

        assert_eq!(report.behaviours, 0);
        assert_eq!(report.trained_models, 8);
        assert_eq!(stores.behaviours.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_dataset_is_rejected_before_writing() {
        let stores = StorageFactory::create_in_memory();
        let mut dataset = CatalogDataset::load(Dataset::Catalog);
        dataset
            .behaviours
            .push(Behaviour::new(1, "Duplicate", "Same id", "dup_function"));

        let result = CatalogSeeder::new(dataset).seed(&stores).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(stores.built_in.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut stores = StorageFactory::create_in_memory();
        stores.trained_models = Arc::new(MockStorage::new().with_error("disk full"));

        let result = CatalogSeeder::new(CatalogDataset::load(Dataset::Catalog))
            .seed(&stores)
            .await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
