//! API layer - HTTP endpoints and middleware

pub mod catalog;
pub mod example;
pub mod graphql;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
