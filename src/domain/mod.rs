//! Domain layer - Catalog entities and storage contracts

pub mod catalog;
pub mod error;
pub mod storage;

pub use catalog::{
    Behaviour, BuiltInModelType, CatalogDataset, CatalogId, Dataset, FunctionParameter,
    ModelCatalog, TrainedModel,
};
pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
