//! Error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("No route matches path: {0}")]
    RouteNotFound(String),

    #[error("Duplicate route {field}: {value}")]
    DuplicateRoute { field: &'static str, value: String },

    #[error("Invalid route '{path}': {reason}")]
    InvalidRoute { path: String, reason: &'static str },

    #[error("Component '{0}' is already registered")]
    DuplicateComponent(String),

    #[error("Invalid base path '{path}': {reason}")]
    InvalidBasePath { path: String, reason: &'static str },

    #[error("Mount target '{0}' not found")]
    MountTargetMissing(String),

    #[error("Router must be installed before mounting")]
    RouterNotInstalled,

    #[error("Navigation to {0} was aborted by a guard")]
    NavigationAborted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
