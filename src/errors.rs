// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for harness operations
//!
//! Only structural misuse and upstream data inconsistencies surface as
//! errors. Command and transport failures are reported through
//! [`Execution`](crate::executor::Execution), management call failures
//! through [`ManagementResponse`](crate::management::ManagementResponse).

use thiserror::Error;

/// Errors that can occur in harness operations
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Caller passed an argument that violates a precondition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A routing type string could not be recognized
    #[error("Malformed routing type: {0:?}")]
    MalformedRoutingType(String),

    /// Management data references an entity that does not exist
    #[error("Queue {queue:?} references unknown address {address:?}")]
    DataInconsistency { queue: String, address: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Broker URL could not be parsed
    #[error("Invalid broker URL: {0}")]
    InvalidUrl(String),

    /// Management client could not be constructed
    #[error("Management client error: {0}")]
    Management(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for HarnessError {
    fn from(err: url::ParseError) -> Self {
        HarnessError::InvalidUrl(err.to_string())
    }
}
