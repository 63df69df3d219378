use crate::{Config, WeatherResult, fetcher::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod openweather;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub const NOT_FOUND_MESSAGE: &str = "City not found. Please try again";
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching weather data. Please try again.";

/// Why a single lookup failed.
///
/// `Display` is the diagnostic form meant for logs; what the user sees comes from
/// [`FetchError::user_message`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Any non-success status. The upstream does not distinguish an unknown city from
    /// other failures in a way worth surfacing, so neither do we.
    #[error("weather service answered with status {status}")]
    NotFound { status: u16 },

    #[error("weather request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => NOT_FOUND_MESSAGE,
            FetchError::Transport(_) | FetchError::Decode(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

/// HTTP settings for the OpenWeather client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: None }
    }
}

/// Construct the OpenWeather source from config, with an optional API key taking
/// precedence over the stored one.
pub fn source_from_config(
    config: &Config,
    api_key_override: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherSource>> {
    let api_key = config.resolve_api_key(api_key_override)?;
    let client = OpenWeatherClient::new(api_key, config.client_settings())?;

    Ok(Box::new(client))
}
