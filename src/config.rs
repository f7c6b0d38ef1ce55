//! Configuration management for topicwatch
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to layer defaults, a TOML file, `TOPICWATCH_*` environment
//! variables, and command-line flags.

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::notify::datadog;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Region identifier stamped into notification titles and tags.
    pub region: String,
    /// Datadog Events API destination; enabled when present.
    pub datadog: Option<DatadogConfig>,
    /// Slack webhook destination; enabled when present.
    pub slack: Option<SlackConfig>,
}

/// Configuration for the Datadog destination.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatadogConfig {
    /// API key sent in the `DD-API-KEY` header.
    pub api_key: String,
    /// Events API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    datadog::DEFAULT_API_BASE.to_string()
}

/// Configuration for the Slack destination.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SlackConfig {
    /// The Slack incoming webhook URL.
    pub webhook_url: String,
}

impl Config {
    /// Loads the application configuration by layering sources: defaults,
    /// the optional TOML file, environment variables, and CLI flags.
    pub fn load(cli: Cli) -> Result<Self> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            if !path.exists() {
                bail!("config file not found at {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            // Nested keys take a double underscore in the environment,
            // e.g. TOPICWATCH_SLACK__WEBHOOK_URL.
            .merge(Env::prefixed("TOPICWATCH_").split("__"))
            .merge(cli)
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            region: "unknown".to_string(),
            datadog: None,
            slack: None,
        }
    }
}
