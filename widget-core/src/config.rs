use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::fetcher::{ClientSettings, DEFAULT_BASE_URL};

/// API key baked in at build time, if `WEATHER_API_KEY` was set when compiling.
pub const BUILD_TIME_API_KEY: Option<&str> = option_env!("WEATHER_API_KEY");

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides the OpenWeather host, e.g. for a caching proxy.
    pub base_url: Option<String>,

    /// Request timeout; unset means the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Pick the API key: explicit override, then the config file, then the build-time key.
    pub fn resolve_api_key(&self, api_key_override: Option<&str>) -> Result<String> {
        self.resolve_api_key_with(api_key_override, BUILD_TIME_API_KEY)
    }

    /// Same as [`Config::resolve_api_key`] with an explicit last-resort key.
    pub fn resolve_api_key_with(
        &self,
        api_key_override: Option<&str>,
        fallback: Option<&str>,
    ) -> Result<String> {
        api_key_override
            .filter(|key| !key.trim().is_empty())
            .or(self.api_key.as_deref().filter(|key| !key.trim().is_empty()))
            .or(fallback.filter(|key| !key.trim().is_empty()))
            .map(str::to_owned)
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather-widget configure`, pass --api-key, or set WEATHER_API_KEY."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
