//! CLI module for the ML catalog mock service
//!
//! Each subcommand serves one profile:
//! - `catalog`: models and behaviours over REST
//! - `models`: models only
//! - `example`: fixed example records
//! - `graphql`: persisted behaviours over GraphQL

pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::ServiceProfile;

pub use serve::ServeArgs;

/// ML catalog mock - read-only metadata catalog for model tooling
#[derive(Parser)]
#[command(name = "ml-catalog-mock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve models and behaviours over REST
    Catalog(ServeArgs),

    /// Serve the model collections only
    Models(ServeArgs),

    /// Serve fixed example records
    Example(ServeArgs),

    /// Serve behaviours over GraphQL
    Graphql(ServeArgs),
}

impl Command {
    pub fn into_parts(self) -> (ServiceProfile, ServeArgs) {
        match self {
            Self::Catalog(args) => (ServiceProfile::Catalog, args),
            Self::Models(args) => (ServiceProfile::Models, args),
            Self::Example(args) => (ServiceProfile::Example, args),
            Self::Graphql(args) => (ServiceProfile::Graphql, args),
        }
    }
}
