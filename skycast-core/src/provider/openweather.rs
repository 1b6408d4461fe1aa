use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    model::{CurrentConditions, WeatherSnapshot},
    sampler::{self, ForecastEntry},
};

use super::{WeatherError, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn get_json(&self, endpoint: &str, city: &str) -> Result<String, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city, "requesting weather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::Request(format!(
                "{endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }

    async fn fetch_current(&self, city: &str) -> Result<OwCurrentResponse, WeatherError> {
        let body = self.get_json("weather", city).await?;

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("current conditions: {e}")))
    }

    async fn fetch_forecast(&self, city: &str) -> Result<OwForecastResponse, WeatherError> {
        let body = self.get_json("forecast", city).await?;

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("forecast: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<ForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let OwCurrentResponse {
            name,
            main,
            weather,
            wind,
        } = self.fetch_current(city).await?;
        let forecast = self.fetch_forecast(city).await?;

        let condition = weather.into_iter().next().ok_or_else(|| {
            WeatherError::MalformedResponse(
                "current conditions have no condition descriptor".to_string(),
            )
        })?;

        Ok(WeatherSnapshot {
            city: name,
            current: CurrentConditions {
                temperature_c: main.temp.round() as i32,
                humidity_pct: main.humidity,
                wind_speed_ms: wind.speed.round() as i32,
                description: condition.description,
                icon_id: condition.icon,
            },
            forecast: sampler::daily_forecast(&forecast.list)?,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
