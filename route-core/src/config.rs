use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Every field has a default, so a missing or partial config file still
/// yields a usable setup pointed at the public endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the place-search (geocoding) endpoint.
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Base URL of the routing endpoint.
    #[serde(default = "default_routing_url")]
    pub routing_url: String,

    /// Identifying User-Agent sent with place-search requests.
    /// Nominatim-style services refuse anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Comma-separated country codes that suggestion queries are limited to.
    #[serde(default = "default_country_codes")]
    pub country_codes: String,

    /// Language hint for suggestion display names.
    #[serde(default = "default_language")]
    pub language: String,

    /// How long a pause in typing must last before a suggestion query fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Per-request timeout for both endpoints.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_routing_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_user_agent() -> String {
    "route-cli/0.1".to_string()
}

fn default_country_codes() -> String {
    "pk".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            routing_url: default_routing_url(),
            user_agent: default_user_agent(),
            country_codes: default_country_codes(),
            language: default_language(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "route-planner", "route-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
