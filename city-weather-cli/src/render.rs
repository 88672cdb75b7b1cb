//! Plain-text rendering of the two screens.

use city_weather_core::{InfoScreen, Phase, ViewState, WeatherCard};

pub const LOADING: &str = "⟳ Loading...";

pub fn weather(state: &ViewState) -> String {
    let screen = match state.phase() {
        Phase::Loading => LOADING.to_string(),
        Phase::Idle => "No weather yet. Enter a city to look it up.".to_string(),
        Phase::Ready => match state.card() {
            Some(card) => card_text(&card),
            None => "The provider reported no conditions for this location.".to_string(),
        },
    };

    match &state.last_error {
        Some(err) => format!("{screen}\n\n(last request failed: {err})"),
        None => screen,
    }
}

pub fn card_text(card: &WeatherCard) -> String {
    let mut lines = vec![
        card.title.clone(),
        card.description.clone(),
        format!("↓ {}  ↑ {}", card.min_temperature(), card.max_temperature()),
        String::new(),
        format!(
            "    {}  {}   ({})",
            card.icon.glyph(),
            card.temperature(),
            card.icon.file_name()
        ),
        format!("    feels like {}", card.feels_like_temperature()),
        String::new(),
        format!(
            "humidity {}   wind {} from {}",
            card.humidity_text(),
            card.wind_text(),
            card.wind_direction_text()
        ),
        format!(
            "clouds {}   pressure {}",
            card.cloud_cover_text(),
            card.pressure_text()
        ),
    ];

    if let Some(at) = card.fetched_at {
        lines.push(format!("updated {}", at.format("%H:%M UTC")));
    }

    lines.join("\n")
}

pub fn info(screen: &InfoScreen) -> String {
    let mut lines = vec![screen.title.to_string()];

    for (i, section) in screen.sections().iter().enumerate() {
        let marker = if section.is_open() { "▾" } else { "▸" };
        lines.push(String::new());
        lines.push(format!("{marker} {}. {}", i + 1, section.trigger));

        if section.is_open() {
            lines.push(format!("    {}", section.body));
            if let Some(link) = &section.link {
                lines.push(format!("    {}: {}", link.label, link.href));
            }
        }
    }

    lines.join("\n")
}
