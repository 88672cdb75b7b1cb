//! Core library for the `city-weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider trait
//! - Weather models, icon resolution and screen state
//! - The fetch controller driving the weather screen
//!
//! It is used by `city-weather-cli`, but any other front end can drive the
//! same controller.

pub mod config;
pub mod controller;
pub mod icon;
pub mod info;
pub mod model;
pub mod provider;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::{Config, ProviderConfig};
pub use controller::{ControllerOptions, WeatherController};
pub use icon::Icon;
pub use info::InfoScreen;
pub use model::WeatherSnapshot;
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use view::{Phase, ViewState, WeatherCard};
