//! ML Catalog Mock
//!
//! A read-only metadata catalog for machine-learning tooling:
//! - Built-in model types and trained model instances
//! - Behaviour rules with typed function parameters
//! - REST and GraphQL transports over one query service
//! - In-memory or SQLite storage, seeded once at startup

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::ServiceProfile;
use domain::CatalogDataset;
use infrastructure::services::{CatalogSeeder, CatalogService};
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state for the catalog profile with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default(), ServiceProfile::Catalog).await
}

/// Open the configured stores, seed them and build the application state
pub async fn create_app_state_with_config(
    config: &AppConfig,
    profile: ServiceProfile,
) -> anyhow::Result<AppState> {
    let storage_config = config.storage_for(profile)?;
    info!(backend = ?storage_config.storage_type(), "Storage backend selected");

    let stores = StorageFactory::create_catalog_stores(&storage_config).await?;

    let dataset = config.dataset_for(profile);
    let report = CatalogSeeder::new(CatalogDataset::load(dataset))
        .seed(&stores)
        .await?;

    info!(dataset = %dataset, inserted = report.total(), "Catalog ready");

    Ok(AppState::new(Arc::new(CatalogService::new(stores))))
}
