//! Infrastructure services

mod catalog_service;
mod seeder;

pub use catalog_service::{CatalogService, CatalogServiceTrait};
pub use seeder::{CatalogSeeder, SeedReport};
