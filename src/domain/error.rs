use thiserror::Error;

/// Message returned when an identifier cannot be parsed
pub const INVALID_ID: &str = "Invalid ID";

/// Message returned when stored records do not have the expected shape
pub const INVALID_DATA_FORMAT: &str = "Invalid data format";

/// Message returned when a behaviour lookup has no match
pub const BEHAVIOUR_NOT_FOUND: &str = "Behaviour not found";

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Stored data could not be decoded into the expected record shape
    pub fn invalid_data_format() -> Self {
        Self::internal(INVALID_DATA_FORMAT)
    }

    /// The caller-facing message, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument { message }
            | Self::NotFound { message }
            | Self::Internal { message }
            | Self::Storage { message }
            | Self::Validation { message }
            | Self::Conflict { message }
            | Self::Configuration { message } => message,
        }
    }
}
