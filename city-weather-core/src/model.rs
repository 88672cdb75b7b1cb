use serde::Deserialize;

/// One condition record, e.g. `{ "main": "Rain", "description": "light rain" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    /// Coarse category used to pick the icon.
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
    #[serde(default)]
    pub sea_level: Option<f64>,
    #[serde(default)]
    pub grnd_level: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Clouds {
    pub all: f64,
}

/// Decoded body of a successful current-weather call.
///
/// A snapshot is always replaced as a whole, never merged with a previous one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    pub clouds: Clouds,
}

impl WeatherSnapshot {
    /// The first condition record, which is the only one shown.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}
