use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};
use std::fmt;

use crate::{model::WeatherSnapshot, provider::FetchError};

use super::WeatherProvider;

pub const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Explicit provider settings, handed to the provider at construction.
#[derive(Clone, PartialEq)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OpenWeatherConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: CURRENT_WEATHER_URL.to_string(),
        }
    }
}

impl fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Client for the OpenWeather current-weather endpoint.
///
/// No timeout is configured; the `reqwest` defaults apply.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: OpenWeatherConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: OpenWeatherConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// The GET request for `city`. The query builder takes care of escaping.
    pub fn build_request(&self, city: &str) -> Result<Request, reqwest::Error> {
        self.http
            .get(&self.config.base_url)
            .query(&[
                ("units", "metric"),
                ("q", city),
                ("appid", self.config.api_key.as_str()),
            ])
            .build()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let request = self.build_request(city)?;
        log::debug!("GET {} (q={city:?})", self.config.base_url);

        let res = self.http.execute(request).await?;
        let status = res.status();
        let body = res.text().await?;

        decode_response(status, &body)
    }
}

fn decode_response(status: StatusCode, body: &str) -> Result<WeatherSnapshot, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            body: truncate_body(body),
        });
    }

    Ok(serde_json::from_str(body)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
