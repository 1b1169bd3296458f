//! Configuration of the `itchio-launcher` command-line tool.
//!
//! The configuration is layered: built-in defaults, then an optional YAML file,
//! then environment variables prefixed with `ITCHIO_CLI_`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! api:
//!   # Base URL of the itch.io JWT API
//!   url: "https://itch.io/api/1/jwt"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Nested keys are separated by a double underscore:
//!
//! ```bash
//! export ITCHIO_CLI_API__URL="http://localhost:8080/api/1/jwt"
//! ```
//!
//! The launcher variables (`ITCHIO_API_KEY`, `ITCHIO_API_KEY_EXPIRES_AT`) are
//! not part of the configuration, they are read by [`crate::launcher`].

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;

/// Prefix of the environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "ITCHIO_CLI_";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Config {
    /// itch.io API configuration
    pub api: Api,
}

/// itch.io API configuration.
///
/// # YAML Section
///
/// ```yaml
/// api:
///   url: "https://itch.io/api/1/jwt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Api {
    /// Base URL of the itch.io JWT API.
    ///
    /// Should include the protocol (http/https). A trailing slash is removed
    /// when loading.
    ///
    /// # Examples
    ///
    /// - `https://itch.io/api/1/jwt`
    /// - `http://localhost:8080/api/1/jwt`
    pub url: String,
}

impl Default for Api {
    fn default() -> Self {
        Api {
            url: DEFAULT_API_URL.to_owned(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a YAML file. Missing keys keep their default.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or a value has the wrong type.
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            if !std::path::Path::new(path).exists() {
                return Err(anyhow::anyhow!("config file {} does not exist", path));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let mut config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        // Normalize the API URL by removing trailing slashes
        while config.api.url.ends_with('/') {
            config.api.url.pop();
        }

        Ok(config)
    }
}
