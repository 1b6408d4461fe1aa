use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::WeatherSnapshot;

pub mod openweather;

/// Errors surfaced by a weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider could not resolve the requested city.
    #[error("city not found")]
    NotFound,

    /// The provider answered with a shape we do not understand.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The request itself failed: transport error or unexpected status.
    #[error("weather request failed: {0}")]
    Request(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions plus the 5-day forecast for a city.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
}
