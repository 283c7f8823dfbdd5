//! Catalog response bodies

use serde::Serialize;

use crate::domain::{Behaviour, BuiltInModelType, ModelCatalog, TrainedModel};

/// GET /models
#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub built_in: Vec<BuiltInModelType>,
    pub trained_models: Vec<TrainedModel>,
}

impl From<ModelCatalog> for ModelsResponse {
    fn from(catalog: ModelCatalog) -> Self {
        Self {
            built_in: catalog.built_in,
            trained_models: catalog.trained_models,
        }
    }
}

/// GET /behaviours
#[derive(Debug, Clone, Serialize)]
pub struct BehavioursResponse {
    pub behaviours: Vec<Behaviour>,
}

impl BehavioursResponse {
    pub fn new(behaviours: Vec<Behaviour>) -> Self {
        Self { behaviours }
    }
}
