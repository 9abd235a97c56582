//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Portal-wide limits and naming.
    #[serde(default)]
    pub portal: PortalConfig,
    /// Priority classifier stub.
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Portal configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Display name of the portal.
    #[serde(default = "default_portal_name")]
    pub name: String,
    /// Maximum length of a complaint title.
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    /// Maximum length of a complaint description or comment body.
    #[serde(default = "default_max_body_length")]
    pub max_body_length: usize,
}

/// Priority classifier configuration.
///
/// The automatic priority classifier is an external collaborator; the core
/// only carries its settings. When disabled, submitted priorities are taken
/// as-is.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClassifierConfig {
    /// Whether automatic priority classification is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Endpoint of the classification service.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: default_portal_name(),
            max_title_length: default_max_title_length(),
            max_body_length: default_max_body_length(),
        }
    }
}

fn default_portal_name() -> String {
    "Campus Complaints".to_string()
}

const fn default_max_title_length() -> usize {
    200
}

const fn default_max_body_length() -> usize {
    4000
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `CAMPUS_ENV`)
    /// 3. Environment variables with `CAMPUS_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        // Pick up a local .env before reading the environment.
        let _ = dotenvy::dotenv();
        let env = std::env::var("CAMPUS_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CAMPUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("CAMPUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
