//! Custom error types for the common library
//!
//! This module defines the errors raised while preparing a service for
//! startup. None of them are recoverable at runtime.

use thiserror::Error;

/// Custom error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Configuration load error: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
