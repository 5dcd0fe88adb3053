//! Common library for the users service
//!
//! This crate provides the building blocks every service binary needs before
//! it can accept requests: configuration loading, the associated error
//! type, and the one-way password hash.

pub mod config;
pub mod error;
pub mod password;

pub use crate::config::ServerConfig;
pub use crate::error::{ConfigError, ConfigResult};
pub use crate::password::hash_password;
