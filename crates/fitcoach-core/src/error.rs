//! Core error types for fitcoach-core.
//!
//! Nothing in the timer itself is fatal: malformed notes fall back to
//! defaults and unauthorized session commands are ignored. These errors
//! cover the edges around it (storage, configuration, the backend API,
//! and invalid workout data).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fitcoach-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home or config directory could not be resolved
    #[error("Cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Validation errors for workout data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Two exercises in one block share the same `order`
    #[error("Duplicate exercise order {order} in block {block}")]
    DuplicateOrder { block: String, order: u32 },

    /// Block type has no interval timer
    #[error("Block type '{0}' has no interval timer")]
    UnsupportedFormat(String),

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),
}

/// Errors returned by the backend API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No token, or the server answered 401
    #[error("Unauthorized: sign in again")]
    Unauthorized,

    /// The token is valid but lacks admin rights (HTTP 403)
    #[error("Forbidden: admin access required")]
    Forbidden,

    /// Any other non-success status
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// Transport failure (connect, timeout, decode)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL could not be joined with a path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Contact submission gave up after exhausting its retries
    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
