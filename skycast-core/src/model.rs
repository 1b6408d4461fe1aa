use serde::{Deserialize, Serialize};

/// Base URL for provider-hosted condition icons.
const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Normalized conditions-plus-forecast record for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City name as reported by the provider.
    pub city: String,
    pub current: CurrentConditions,
    /// Chronologically ascending, at most five entries.
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: i32,
    pub humidity_pct: u8,
    pub wind_speed_ms: i32,
    pub description: String,
    pub icon_id: String,
}

impl CurrentConditions {
    /// URL of the large icon variant shown next to current conditions.
    pub fn icon_url(&self) -> String {
        format!("{ICON_URL_BASE}/{}@2x.png", self.icon_id)
    }
}

/// One calendar day's representative reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayForecast {
    /// Human-readable day, e.g. `Tue, Aug 5`.
    pub date: String,
    pub temperature_c: i32,
    pub description: String,
    pub icon_id: String,
}

impl DayForecast {
    /// URL of the small icon variant used on forecast tiles.
    pub fn icon_url(&self) -> String {
        format!("{ICON_URL_BASE}/{}.png", self.icon_id)
    }
}

/// A bookmarked city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteLocation {
    /// Assigned once at creation, never reused.
    pub id: String,
    pub name: String,
}
