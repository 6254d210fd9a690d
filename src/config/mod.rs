// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use ::config::{Config, Environment, Map};

const ENV_PREFIX: &str = "API";

/// Load configuration from `API_*` environment variables.
pub fn load_config() -> Result<ServerConfig> {
    load_config_from(None)
}

/// Same as [`load_config`], reading from `source` instead of the process
/// environment when one is given.
pub fn load_config_from(source: Option<Map<String, String>>) -> Result<ServerConfig> {
    let settings = Config::builder()
        .set_default("port", i64::from(DEFAULT_PORT))?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .ignore_empty(true)
                .source(source),
        )
        .build()
        .context("Failed to read environment configuration")?;

    settings
        .try_deserialize::<ServerConfig>()
        .context("Invalid server configuration")
}
