//! Weather screen state and the card derived from it.
//!
//! Transitions are plain methods on [`ViewState`] so they can be tested
//! without a provider or a runtime. The controller applies them.

use chrono::{DateTime, Utc};
use std::{fmt::Display, sync::Arc};

use crate::{
    icon::{self, Icon},
    model::WeatherSnapshot,
};

/// What the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No snapshot yet and nothing in flight.
    Idle,
    /// A fetch is in flight, with or without a stale snapshot.
    Loading,
    /// A snapshot is present and nothing is in flight.
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub city: String,
    pub snapshot: Option<Arc<WeatherSnapshot>>,
    pub icon: Option<Icon>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub is_loading: bool,
    pub refreshing: bool,
    /// Message of the last failure; cleared by the next success.
    pub last_error: Option<String>,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        if self.is_loading || self.refreshing {
            Phase::Loading
        } else if self.snapshot.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    pub fn begin_fetch(&mut self) {
        self.is_loading = true;
    }

    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
    }

    pub fn end_refresh(&mut self) {
        self.refreshing = false;
    }

    /// Replace the snapshot wholesale and clear the busy flag.
    pub fn apply_success(&mut self, snapshot: WeatherSnapshot, at: DateTime<Utc>) {
        // The icon follows the snapshot; an empty condition list shows none.
        self.icon = snapshot
            .primary_condition()
            .map(|c| icon::resolve(&c.main));
        self.snapshot = Some(Arc::new(snapshot));
        self.fetched_at = Some(at);
        self.last_error = None;
        self.is_loading = false;
    }

    /// Keep whatever was shown before and clear the busy flag.
    pub fn apply_failure(&mut self, message: impl Display) {
        self.last_error = Some(message.to_string());
        self.is_loading = false;
    }

    /// Clear the busy flag without touching the snapshot.
    pub fn finish_discarded(&mut self) {
        self.is_loading = false;
    }

    /// The card to render, if the snapshot has a condition to describe.
    pub fn card(&self) -> Option<WeatherCard> {
        let snapshot = self.snapshot.as_ref()?;
        WeatherCard::from_snapshot(snapshot, self.fetched_at)
    }
}

/// Display-ready values of a snapshot. Numbers are copied unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub cloud_cover: f64,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl WeatherCard {
    /// `None` when the snapshot carries no condition record.
    pub fn from_snapshot(
        snapshot: &WeatherSnapshot,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        let primary = snapshot.primary_condition()?;

        Some(Self {
            title: snapshot.name.clone(),
            description: primary.description.clone(),
            icon: icon::resolve(&primary.main),
            temp: snapshot.main.temp,
            temp_min: snapshot.main.temp_min,
            temp_max: snapshot.main.temp_max,
            feels_like: snapshot.main.feels_like,
            humidity: snapshot.main.humidity,
            pressure: snapshot.main.pressure,
            wind_speed: snapshot.wind.speed,
            wind_deg: snapshot.wind.deg,
            cloud_cover: snapshot.clouds.all,
            fetched_at,
        })
    }

    pub fn temperature(&self) -> String {
        celsius(self.temp)
    }

    pub fn min_temperature(&self) -> String {
        celsius(self.temp_min)
    }

    pub fn max_temperature(&self) -> String {
        celsius(self.temp_max)
    }

    pub fn feels_like_temperature(&self) -> String {
        celsius(self.feels_like)
    }

    pub fn humidity_text(&self) -> String {
        format!("{}%", self.humidity)
    }

    // units=metric reports wind in metres per second.
    pub fn wind_text(&self) -> String {
        format!("{} m/s", self.wind_speed)
    }

    pub fn wind_direction_text(&self) -> String {
        format!("{}°", self.wind_deg)
    }

    pub fn pressure_text(&self) -> String {
        format!("{} hPa", self.pressure)
    }

    pub fn cloud_cover_text(&self) -> String {
        format!("{}%", self.cloud_cover)
    }
}

fn celsius(v: f64) -> String {
    format!("{v}°C")
}
