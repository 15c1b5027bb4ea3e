use crate::{
    Config, ForecastRequest, WeatherReport,
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_forecast(&self, request: &ForecastRequest) -> anyhow::Result<WeatherReport>;
}

/// Construct the live provider from config.
///
/// Only Open-Meteo serves data; other configured providers are
/// informational and fall back to it.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if config.provider != crate::config::OPEN_METEO {
        tracing::debug!(
            provider = %config.provider,
            "Configured provider has no live backend, fetching from Open-Meteo"
        );
    }

    let provider = OpenMeteoProvider::new(config.open_meteo_url())?;
    Ok(Box::new(provider))
}
