use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::model::{OwCurrentResponse, WeatherResult};

use super::{ClientSettings, FetchError, WeatherSource};

const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: Url,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, settings: ClientSettings) -> Result<Self> {
        let base = if settings.base_url.ends_with('/') {
            settings.base_url.clone()
        } else {
            format!("{}/", settings.base_url)
        };

        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(CURRENT_WEATHER_PATH))
            .with_context(|| {
                format!("Invalid weather service base URL: {}", settings.base_url)
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { api_key, endpoint, http })
    }

    /// Full request URL for `city`. The city is query-encoded.
    pub fn request_url(&self, city: &str) -> Url {
        self.url_with_key(city, &self.api_key)
    }

    fn url_with_key(&self, city: &str, key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", city)
            .append_pair("appid", key)
            .append_pair("units", "metric");
        url
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherResult, FetchError> {
        debug!(url = %self.url_with_key(city, "***"), "requesting current weather");

        let res = self.http.get(self.request_url(city)).send().await.map_err(|err| {
            let err = err.without_url();
            warn!(error = %err, "weather request could not be sent");
            FetchError::Transport(Box::new(err))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            let err = err.without_url();
            warn!(error = %err, %status, "failed to read weather response body");
            FetchError::Transport(Box::new(err))
        })?;

        // Only a JSON error body means "not found"; anything else is a failed fetch.
        if !status.is_success() {
            if let Err(err) = serde_json::from_str::<serde_json::Value>(&body) {
                warn!(error = %err, %status, body = %truncate_body(&body), "non-JSON error response");
                return Err(FetchError::Decode(err));
            }

            warn!(%status, body = %truncate_body(&body), "weather lookup rejected");
            return Err(FetchError::NotFound { status: status.as_u16() });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, body = %truncate_body(&body), "malformed weather response");
            FetchError::Decode(err)
        })?;

        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
