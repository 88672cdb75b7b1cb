//! Test doubles shared by the unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};
use tokio::sync::oneshot;

use crate::{
    model::{Clouds, Condition, MainReadings, WeatherSnapshot, Wind},
    provider::{FetchError, WeatherProvider},
};

type Reply = Result<WeatherSnapshot, FetchError>;

pub fn snapshot(name: &str, category: &str, temp: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        name: name.to_string(),
        weather: vec![Condition {
            main: category.to_string(),
            description: format!("{} sky", category.to_lowercase()),
        }],
        main: MainReadings {
            temp,
            feels_like: temp - 1.0,
            temp_min: temp - 2.5,
            temp_max: temp + 1.5,
            pressure: 1012.0,
            humidity: 63.0,
            sea_level: None,
            grnd_level: None,
        },
        wind: Wind {
            speed: 5.0,
            deg: 200.0,
        },
        clouds: Clouds { all: 0.0 },
    }
}

/// Provider whose calls are answered, in call order, by scripted replies.
#[derive(Debug, Default)]
pub struct FakeProvider {
    replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    cities: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// Queue a reply that is sent later through the returned handle.
    pub fn script(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(rx);
        tx
    }

    /// Queue a reply that is available immediately.
    pub fn respond(&self, reply: Reply) {
        let tx = self.script();
        let _ = tx.send(reply);
    }

    pub fn calls(&self) -> usize {
        self.cities().len()
    }

    pub fn cities(&self) -> Vec<String> {
        self.cities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let next = {
            self.cities
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(city.to_string());
            self.replies
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
        };

        let unscripted = || FetchError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: format!("no reply scripted for {city:?}"),
        };

        match next {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(unscripted())),
            None => Err(unscripted()),
        }
    }
}
