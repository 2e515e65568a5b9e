//! Error types for the contacts client
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for contacts operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the contacts client
#[derive(Error, Debug)]
pub enum Error {
    /// Contact store-related errors
    #[error("Contact store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-success response from the remote store
    #[error("HTTP error: {0}")]
    Http(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Create a contact store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
