//! Request and response types

pub mod catalog;
pub mod error;
pub mod example;
pub mod json;

pub use catalog::{BehavioursResponse, ModelsResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use example::{BehaviourResponse, ModelResponse};
pub use json::Json;
