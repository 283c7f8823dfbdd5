//! Storage entity traits

use std::fmt::{Debug, Display};

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Display + Send + Sync + Eq + std::hash::Hash {}

impl StorageKey for String {}

/// Trait for types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Name of the collection holding this entity kind
    const COLLECTION: &'static str;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}
