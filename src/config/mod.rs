//! Application configuration

mod app_config;
mod profile;

pub use app_config::{
    AppConfig, LogFormat, LoggingConfig, SeedConfig, ServerConfig, StorageSettings,
};
pub use profile::ServiceProfile;
