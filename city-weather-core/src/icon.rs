//! Mapping from a condition category to a bundled icon.

use std::fmt;

/// Icons bundled with the application.
///
/// `Default` is the fallback for any category outside the known set and is
/// bundled like every other icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Clouds,
    Clear,
    Snow,
    Rain,
    Mist,
    Drizzle,
    Default,
}

impl Icon {
    pub const fn all() -> &'static [Icon] {
        &[
            Icon::Clouds,
            Icon::Clear,
            Icon::Snow,
            Icon::Rain,
            Icon::Mist,
            Icon::Drizzle,
            Icon::Default,
        ]
    }

    /// Asset identifier of the icon.
    pub fn file_name(&self) -> &'static str {
        match self {
            Icon::Clouds => "clouds.png",
            Icon::Clear => "clear.png",
            Icon::Snow => "snow.png",
            Icon::Rain => "rain.png",
            Icon::Mist => "mist.png",
            Icon::Drizzle => "drizzle.png",
            Icon::Default => "default.png",
        }
    }

    /// Text rendition used by terminal front ends.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Clouds => "☁",
            Icon::Clear => "☀",
            Icon::Snow => "❄",
            Icon::Rain => "☂",
            Icon::Mist => "≋",
            Icon::Drizzle => "⛆",
            Icon::Default => "◌",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Resolve a provider category label. Matching is exact and case-sensitive.
pub fn resolve(category: &str) -> Icon {
    match category {
        "Clouds" => Icon::Clouds,
        "Clear" => Icon::Clear,
        "Snow" => Icon::Snow,
        "Rain" => Icon::Rain,
        "Mist" => Icon::Mist,
        "Drizzle" => Icon::Drizzle,
        _ => Icon::Default,
    }
}
