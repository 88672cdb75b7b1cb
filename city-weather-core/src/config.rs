use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{controller::ControllerOptions, provider::openweather::OpenWeatherConfig};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Settings for the OpenWeather provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override for the current-weather endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Drop responses that belong to a request older than one already applied.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Example TOML:
    /// [openweather]
    /// api_key = "..."
    #[serde(default)]
    pub openweather: ProviderConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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
        let dirs = ProjectDirs::from("dev", "city-weather", "city-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }

    /// Provider settings with the `OPENWEATHER_API_KEY` override applied.
    pub fn openweather_config(&self) -> OpenWeatherConfig {
        self.openweather_config_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`Config::openweather_config`] with an explicit override value.
    ///
    /// A missing key is not an error: it becomes an empty string and the
    /// provider rejects the request upstream.
    pub fn openweather_config_with(&self, env_key: Option<String>) -> OpenWeatherConfig {
        let api_key = env_key
            .filter(|k| !k.is_empty())
            .or_else(|| self.openweather.api_key.clone())
            .unwrap_or_else(|| {
                log::warn!(
                    "No OpenWeather API key configured; set {API_KEY_ENV} or run `city-weather configure`"
                );
                String::new()
            });

        let mut cfg = OpenWeatherConfig::new(api_key);
        if let Some(url) = &self.openweather.base_url {
            cfg.base_url = url.clone();
        }
        cfg
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            discard_stale_responses: self.openweather.discard_stale_responses,
        }
    }
}
