//! Catalog endpoint handlers

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, BehavioursResponse, Json, ModelsResponse};
use crate::domain::Behaviour;

/// GET /models
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsResponse>, ApiError> {
    debug!("Listing models");

    let catalog = state.catalog.list_models().await?;
    Ok(Json(ModelsResponse::from(catalog)))
}

/// GET /behaviours
pub async fn list_behaviours(
    State(state): State<AppState>,
) -> Result<Json<BehavioursResponse>, ApiError> {
    debug!("Listing behaviours");

    let behaviours = state.catalog.list_behaviours().await?;
    Ok(Json(BehavioursResponse::new(behaviours)))
}

/// GET /behaviours/{id}
pub async fn get_behaviour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Behaviour>, ApiError> {
    debug!(id = %id, "Getting behaviour");

    let behaviour = state.catalog.get_behaviour(&id).await?;
    Ok(Json(behaviour))
}
