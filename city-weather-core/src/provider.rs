use crate::{Config, WeatherSnapshot, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Every way a fetch can fail. The controller treats them alike; the split
/// exists for logging and for callers that want to tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-form city query, passed through as-is.
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::new(config.openweather_config()))
}
