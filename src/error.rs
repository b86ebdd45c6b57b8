//! Error types for queue-acl
//!
//! This module defines the error hierarchy used throughout the crate.
//! There is deliberately no "access denied" error: a denied operation is
//! simply absent from the evaluation result.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Invalid queue name '{name}': {reason}")]
    InvalidQueueName { name: String, reason: String },

    #[error("Unknown operation key '{key}' for queue '{queue}'")]
    UnknownOperation { queue: String, key: String },
}

impl ConfigError {
    pub fn invalid_queue_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQueueName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_operation(queue: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownOperation {
            queue: queue.into(),
            key: key.into(),
        }
    }
}
