//! Server configuration for the users service
//!
//! Values come from built-in defaults, overridden by environment variables
//! carrying the `USERS_API_` prefix.

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Prefix shared by every environment variable the service reads
pub const ENV_PREFIX: &str = "USERS_API";

/// Server configuration struct
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind the HTTP listener to
    pub host: String,
    /// Port to bind the HTTP listener to
    pub port: u16,
    /// Default log filter, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Whether the store starts with the demo users
    pub seed_data: bool,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `USERS_API_HOST`: bind interface (default: "0.0.0.0")
    /// - `USERS_API_PORT`: bind port (default: 8080)
    /// - `USERS_API_LOG_LEVEL`: log filter (default: "info")
    /// - `USERS_API_SEED_DATA`: load the demo users (default: true)
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(None)
    }

    /// Load the configuration, reading variables from `vars` instead of the
    /// process environment when given
    pub fn load(vars: Option<config::Map<String, String>>) -> ConfigResult<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("log_level", "info")?
            .set_default("seed_data", true)?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!("Loaded server configuration: {:?}", config);
        Ok(config)
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "log_level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
