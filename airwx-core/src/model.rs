use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::Condition;

pub const MIN_FORECAST_DAYS: u8 = 1;
pub const MAX_FORECAST_DAYS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C", alias = "c")]
    Celsius,
    #[serde(rename = "F", alias = "f")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Value of Open-Meteo's `temperature_unit` parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => f.write_str("C"),
            TemperatureUnit::Fahrenheit => f.write_str("F"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: C, F."
            )),
        }
    }
}

/// Clamp a requested forecast length to what the provider serves.
pub fn clamp_days(days: i64) -> u8 {
    days.clamp(MIN_FORECAST_DAYS.into(), MAX_FORECAST_DAYS.into()) as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub unit: TemperatureUnit,
    pub days: u8,
}

/// Observed conditions at request time. Missing values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub time: Option<String>,
    #[serde(rename = "temperature_2m", alias = "temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: Option<f64>,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Option<f64>,
    #[serde(rename = "dew_point_2m")]
    pub dew_point: Option<f64>,
    pub precipitation: Option<f64>,
    pub rain: Option<f64>,
    pub showers: Option<f64>,
    pub snowfall: Option<f64>,
    #[serde(alias = "weathercode")]
    pub weather_code: Value,
    pub cloud_cover: Option<f64>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub surface_pressure: Option<f64>,
    #[serde(rename = "wind_speed_10m", alias = "windspeed")]
    pub wind_speed_kt: Option<f64>,
    #[serde(rename = "wind_direction_10m", alias = "winddirection")]
    pub wind_direction: Option<f64>,
    #[serde(rename = "wind_gusts_10m")]
    pub wind_gusts_kt: Option<f64>,
}

impl CurrentConditions {
    pub fn condition(&self) -> Condition {
        Condition::from_value(&self.weather_code)
    }
}

/// Per-day forecast as parallel sequences, indexed by day.
///
/// Sequences other than `dates` may be shorter; missing entries read as
/// absent values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastSeries {
    #[serde(rename = "time")]
    pub dates: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temp_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    pub temp_min: Vec<Option<f64>>,
    #[serde(rename = "weathercode", alias = "weather_code")]
    pub weather_codes: Vec<Value>,
    #[serde(rename = "precipitation_sum")]
    pub precipitation: Vec<Option<f64>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
}

/// One day of a [`ForecastSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast<'a> {
    pub date: &'a str,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub condition: Condition,
    pub precipitation: Option<f64>,
    pub sunrise: Option<&'a str>,
    pub sunset: Option<&'a str>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn day(&self, idx: usize) -> Option<DailyForecast<'_>> {
        let date = self.dates.get(idx)?;

        Some(DailyForecast {
            date,
            temp_max: number_at(&self.temp_max, idx),
            temp_min: number_at(&self.temp_min, idx),
            condition: self
                .weather_codes
                .get(idx)
                .map(Condition::from_value)
                .unwrap_or(Condition::Unknown),
            precipitation: number_at(&self.precipitation, idx),
            sunrise: text_at(&self.sunrise, idx),
            sunset: text_at(&self.sunset, idx),
        })
    }

    pub fn days(&self) -> impl Iterator<Item = DailyForecast<'_>> {
        (0..self.len()).filter_map(|idx| self.day(idx))
    }

    /// Index of `today` in the series, or 0 when it isn't listed.
    pub fn today_index(&self, today: NaiveDate) -> usize {
        let today = today.format("%Y-%m-%d").to_string();
        self.dates.iter().position(|d| *d == today).unwrap_or(0)
    }

    /// Sunrise and sunset for `today`, when both are known.
    pub fn sun_times(&self, today: NaiveDate) -> Option<(&str, &str)> {
        let day = self.day(self.today_index(today))?;
        Some((day.sunrise?, day.sunset?))
    }
}

fn number_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

fn text_at(values: &[Option<String>], idx: usize) -> Option<&str> {
    values.get(idx).and_then(|v| v.as_deref())
}

/// Decoded provider response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    #[serde(alias = "current_weather")]
    pub current: Option<CurrentConditions>,
    #[serde(alias = "current_weather_units")]
    pub current_units: BTreeMap<String, String>,
    pub daily: ForecastSeries,
}

impl WeatherReport {
    /// Unit label the provider reported for a current variable.
    pub fn current_unit<'a>(&'a self, variable: &str, fallback: &'a str) -> &'a str {
        self.current_units
            .get(variable)
            .map(String::as_str)
            .unwrap_or(fallback)
    }
}
