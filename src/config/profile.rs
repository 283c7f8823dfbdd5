use std::fmt;

use crate::domain::Dataset;
use crate::infrastructure::storage::StorageType;

/// Which route set a server process exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceProfile {
    /// Models and behaviours over REST
    Catalog,
    /// Models only
    Models,
    /// Fixed example records
    Example,
    /// Behaviours over GraphQL
    Graphql,
}

impl ServiceProfile {
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Catalog => 8090,
            Self::Models => 8091,
            Self::Example => 8111,
            Self::Graphql => 8080,
        }
    }

    pub fn default_backend(&self) -> StorageType {
        match self {
            Self::Graphql => StorageType::Sqlite,
            _ => StorageType::InMemory,
        }
    }

    pub fn default_dataset(&self) -> Dataset {
        match self {
            Self::Graphql => Dataset::Sample,
            _ => Dataset::Catalog,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Models => "models",
            Self::Example => "example",
            Self::Graphql => "graphql",
        }
    }
}

impl fmt::Display for ServiceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
