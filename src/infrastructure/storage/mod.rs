//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
pub mod migrations;
mod relational;
mod sqlite;

pub use factory::{CatalogStores, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use migrations::{run_catalog_migrations, Migration, SqliteMigrator};
pub use relational::SqliteBehaviourStorage;
pub use sqlite::{connect_pool, SqliteConfig, SqliteStorage};
