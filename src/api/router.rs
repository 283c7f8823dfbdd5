use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::catalog;
use super::example;
use super::graphql;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use crate::config::ServiceProfile;

/// Create the router for one service profile
pub fn create_router(state: AppState, profile: ServiceProfile) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(profile_routes(profile))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn profile_routes(profile: ServiceProfile) -> Router<AppState> {
    match profile {
        ServiceProfile::Catalog => Router::new()
            .route("/models", get(catalog::list_models))
            .route("/behaviours", get(catalog::list_behaviours))
            .route("/behaviours/{id}", get(catalog::get_behaviour)),
        ServiceProfile::Models => Router::new().route("/models", get(catalog::list_models)),
        ServiceProfile::Example => Router::new()
            .route("/model", get(example::get_model))
            .route("/behaviour", get(example::get_behaviour)),
        ServiceProfile::Graphql => Router::new().route(
            "/graphql",
            post(graphql::graphql_handler).get(graphql::graphiql),
        ),
    }
}
