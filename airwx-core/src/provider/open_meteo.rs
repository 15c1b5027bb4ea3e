use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use crate::model::{ForecastRequest, WeatherReport};

use super::WeatherProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const CURRENT_VARIABLES: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "apparent_temperature",
    "precipitation",
    "rain",
    "showers",
    "snowfall",
    "weather_code",
    "cloud_cover",
    "visibility",
    "uv_index",
    "pressure_msl",
    "surface_pressure",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
];

const DAILY_VARIABLES: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "weathercode",
    "precipitation_sum",
    "sunrise",
    "sunset",
];

/// Client for the keyless Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url: url.to_string(),
            http,
        })
    }

    /// Query parameters for a forecast request.
    pub fn query(request: &ForecastRequest) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("current", CURRENT_VARIABLES.join(",")),
            ("temperature_unit", request.unit.query_value().to_string()),
            ("wind_speed_unit", "kn".to_string()),
            ("daily", DAILY_VARIABLES.join(",")),
            ("forecast_days", request.days.to_string()),
            ("timezone", "auto".to_string()),
        ]
    }

    fn parse(body: &str) -> Result<WeatherReport> {
        serde_json::from_str(body).context("Failed to parse Open-Meteo forecast JSON")
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<WeatherReport> {
        let query = Self::query(request);
        tracing::debug!(url = %self.url, ?query, "Requesting forecast");

        let res = self
            .http
            .get(&self.url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        tracing::debug!(%status, "Open-Meteo responded");
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        tracing::debug!(body = %truncate_body(&body), "Open-Meteo payload");
        Self::parse(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
