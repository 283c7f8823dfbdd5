//! Catalog domain - Model types, trained models and behaviours

mod dataset;
mod entity;
mod id;
mod validation;

pub use dataset::{CatalogDataset, Dataset};
pub use entity::{
    Behaviour, BuiltInModelType, FunctionParameter, ModelCatalog, TrainedModel,
};
pub use id::CatalogId;
pub use validation::{validate_input_shape, CatalogValidationError};
