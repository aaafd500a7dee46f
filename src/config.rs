// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Legacy Elasticsearch client variables; they win over
/// every other source.
const ENGINE_URL_ENV: &str = "ELASTICSEARCH_URL";
const ENGINE_USERNAME_ENV: &str = "ELASTICSEARCH_USERNAME";
const ENGINE_PASSWORD_ENV: &str = "ELASTICSEARCH_PASSWORD";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    /// Create the projects index on startup when it is missing.
    pub bootstrap_index: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Skip TLS certificate verification. Development clusters only.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Like [`Config::load`], reading the `ELASTICSEARCH_*` overrides through
    /// `lookup`. Empty values count as unset.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let defaults = Self::default_config();

        let mut builder = config::Config::builder()
            .set_default("server.listen", defaults.server.listen.to_string())
            .and_then(|b| b.set_default("server.bootstrap_index", defaults.server.bootstrap_index))
            .and_then(|b| b.set_default("engine.url", defaults.engine.url.clone()))
            .and_then(|b| {
                b.set_default(
                    "engine.accept_invalid_certs",
                    defaults.engine.accept_invalid_certs,
                )
            })
            .map_err(|e| SearchError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PROJECT_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder
            .set_override_option("engine.url", env(ENGINE_URL_ENV))
            .and_then(|b| b.set_override_option("engine.username", env(ENGINE_USERNAME_ENV)))
            .and_then(|b| b.set_override_option("engine.password", env(ENGINE_PASSWORD_ENV)))
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                listen: SocketAddr::from(([0, 0, 0, 0], 8081)),
                bootstrap_index: true,
            },
            engine: EngineConfig {
                url: "http://localhost:9200".to_string(),
                username: None,
                password: None,
                accept_invalid_certs: false,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.engine.url)
            .map_err(|e| SearchError::Config(e.to_string()))?;

        Validator::validate_credentials(
            self.engine.username.as_deref(),
            self.engine.password.as_deref(),
        )
        .map_err(|e| SearchError::Config(e.to_string()))?;

        Ok(())
    }
}
