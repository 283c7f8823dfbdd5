//! Application state for shared services

use std::sync::Arc;

use crate::api::graphql::{build_schema, CatalogSchema};
use crate::infrastructure::services::CatalogServiceTrait;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogServiceTrait>,
    pub schema: CatalogSchema,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogServiceTrait>) -> Self {
        let schema = build_schema(catalog.clone());
        Self { catalog, schema }
    }
}
