//! Example profile handlers

use crate::api::types::{BehaviourResponse, Json, ModelResponse};

/// GET /model
pub async fn get_model() -> Json<ModelResponse> {
    Json(ModelResponse::example())
}

/// GET /behaviour
pub async fn get_behaviour() -> Json<BehaviourResponse> {
    Json(BehaviourResponse::example())
}
