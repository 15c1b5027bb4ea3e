//! Core library for the `airwx` CLI.
//!
//! This crate defines:
//! - Airport code resolution across ICAO, IATA, local and GPS namespaces
//! - Weather code classification and Unicode-aware text measurement
//! - Rendering of current conditions and multi-day forecast tables
//! - Configuration, persisted airports/favorites, and the Open-Meteo client
//!
//! Rendering and index building are pure; anything that depends on the
//! clock or the network takes it as a parameter or lives in [`provider`].

pub mod airport;
pub mod condition;
pub mod config;
pub mod favorites;
pub mod model;
pub mod provider;
pub mod render;
pub mod text;

pub use airport::{AirportIndex, AirportRecord, AirportRow, AirportStore, BuildReport};
pub use condition::{Condition, classify};
pub use config::{AppPaths, Config, ProviderConfig};
pub use favorites::Favorites;
pub use model::{ForecastRequest, ForecastSeries, TemperatureUnit, WeatherReport};
pub use provider::WeatherProvider;
