//! GraphQL adapter over the catalog service
//!
//! Exposes `behaviours` and `behaviour(id)` with the same field names as the
//! REST bodies. Errors carry the REST message plus an `extensions.code`.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema, SimpleObject, ID,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Behaviour, DomainError, FunctionParameter};
use crate::infrastructure::services::CatalogServiceTrait;

pub type CatalogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Builds the schema with the catalog service attached as context data
pub fn build_schema(catalog: Arc<dyn CatalogServiceTrait>) -> CatalogSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(catalog)
        .finish()
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "FunctionParameter")]
pub struct ParameterObject {
    name: String,
    #[graphql(name = "type")]
    param_type: String,
}

impl From<&FunctionParameter> for ParameterObject {
    fn from(parameter: &FunctionParameter) -> Self {
        Self {
            name: parameter.name().to_string(),
            param_type: parameter.param_type().to_string(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Behaviour", rename_fields = "snake_case")]
pub struct BehaviourObject {
    id: ID,
    name: String,
    description: String,
    function_reference: String,
    function_parameters: Vec<ParameterObject>,
}

impl From<Behaviour> for BehaviourObject {
    fn from(behaviour: Behaviour) -> Self {
        Self {
            id: ID(behaviour.id().to_string()),
            name: behaviour.name().to_string(),
            description: behaviour.description().to_string(),
            function_reference: behaviour.function_reference().to_string(),
            function_parameters: behaviour
                .function_parameters()
                .iter()
                .map(ParameterObject::from)
                .collect(),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn behaviours(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<BehaviourObject>> {
        let catalog = ctx.data::<Arc<dyn CatalogServiceTrait>>()?;

        let behaviours = catalog.list_behaviours().await.map_err(graphql_error)?;
        Ok(behaviours.into_iter().map(BehaviourObject::from).collect())
    }

    async fn behaviour(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<BehaviourObject> {
        let catalog = ctx.data::<Arc<dyn CatalogServiceTrait>>()?;

        let behaviour = catalog.get_behaviour(&id).await.map_err(graphql_error)?;
        Ok(BehaviourObject::from(behaviour))
    }
}

fn graphql_error(err: DomainError) -> async_graphql::Error {
    let api_error = ApiError::from(err);
    let code = match api_error.status {
        StatusCode::BAD_REQUEST => "INVALID_ARGUMENT",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        _ => "INTERNAL",
    };

    async_graphql::Error::new(api_error.message()).extend_with(|_, e| e.set("code", code))
}

/// POST /graphql
pub async fn graphql_handler(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!(operation = ?request.operation_name, "Executing GraphQL request");

    Json(state.schema.execute(request).await)
}

/// GET /graphql
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
