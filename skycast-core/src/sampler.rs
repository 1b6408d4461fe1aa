//! Reduces the provider's 3-hourly forecast series to one reading per day.

use chrono::DateTime;
use serde::Deserialize;

use crate::{model::DayForecast, provider::WeatherError};

/// Number of 3-hour readings the provider emits per calendar day.
const READINGS_PER_DAY: usize = 8;

/// Maximum number of days shown on the forecast.
const MAX_FORECAST_DAYS: usize = 5;

/// One 3-hourly reading from the provider's forecast series.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp of the reading.
    pub dt: i64,
    pub main: ForecastReading,
    pub weather: Vec<ConditionDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastReading {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionDescriptor {
    pub description: String,
    pub icon: String,
}

/// Pick one representative reading per day out of a 3-hourly series.
///
/// Takes every eighth entry starting at the first, so each day is
/// represented by the reading at the same time of day the series starts at,
/// then truncates to five days. The series is expected chronologically
/// ascending (provider contract); a series shorter than a day yields at
/// most the first entry.
pub fn daily_forecast(entries: &[ForecastEntry]) -> Result<Vec<DayForecast>, WeatherError> {
    entries
        .iter()
        .step_by(READINGS_PER_DAY)
        .take(MAX_FORECAST_DAYS)
        .map(day_forecast)
        .collect()
}

fn day_forecast(entry: &ForecastEntry) -> Result<DayForecast, WeatherError> {
    let condition = entry.weather.first().ok_or_else(|| {
        WeatherError::MalformedResponse("forecast entry has no condition descriptor".to_string())
    })?;

    Ok(DayForecast {
        date: format_day(entry.dt)?,
        temperature_c: entry.main.temp.round() as i32,
        description: condition.description.clone(),
        icon_id: condition.icon.clone(),
    })
}

/// Format a Unix timestamp as e.g. `Tue, Aug 5` (UTC).
fn format_day(ts: i64) -> Result<String, WeatherError> {
    let day = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
        WeatherError::MalformedResponse(format!("forecast timestamp {ts} is out of range"))
    })?;

    Ok(day.format("%a, %b %-d").to_string())
}
