use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::model::TemperatureUnit;

/// Environment variable that relocates every airwx file into one directory.
pub const HOME_ENV: &str = "AIRWX_HOME";

pub const OPEN_METEO: &str = "open-meteo";
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Catalogue entry for a weather data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Temperature unit used when `--unit` is not given.
    pub unit: TemperatureUnit,

    /// Name of the source shown in the report header.
    pub provider: String,

    /// Forecast length used when `--days` is not given.
    pub days: u8,

    pub no_emoji: bool,

    /// Example TOML:
    /// [providers.open-meteo]
    /// url = "https://api.open-meteo.com/v1/forecast"
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::Celsius,
            provider: OPEN_METEO.to_string(),
            days: 7,
            no_emoji: false,
            providers: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Configuration written by `airwx setup`.
    pub fn starter() -> Self {
        let entry = |url: &str, notes: &str, api_key: Option<&str>| ProviderConfig {
            url: url.to_string(),
            notes: notes.to_string(),
            api_key: api_key.map(str::to_string),
        };

        let providers = BTreeMap::from([
            (
                OPEN_METEO.to_string(),
                entry(OPEN_METEO_URL, "Free, no API key required, global", None),
            ),
            (
                "noaa".to_string(),
                entry(
                    "https://api.weather.gov/",
                    "US only, no API key required, official NWS",
                    None,
                ),
            ),
            (
                "openweathermap".to_string(),
                entry(
                    "https://api.openweathermap.org/data/2.5/onecall",
                    "Free tier, global, requires API key (https://openweathermap.org/api)",
                    Some("YOUR_OPENWEATHERMAP_API_KEY"),
                ),
            ),
            (
                "weatherapi".to_string(),
                entry(
                    "https://api.weatherapi.com/v1/forecast.json",
                    "Free tier, global, requires API key (https://www.weatherapi.com/)",
                    Some("YOUR_WEATHERAPI_KEY"),
                ),
            ),
        ]);

        Self {
            unit: TemperatureUnit::Fahrenheit,
            provider: "noaa".to_string(),
            providers,
            ..Self::default()
        }
    }

    /// URL of the configured provider, for display.
    pub fn provider_url(&self) -> &str {
        self.providers
            .get(&self.provider)
            .map(|p| p.url.as_str())
            .unwrap_or(OPEN_METEO_URL)
    }

    /// Endpoint used for live data. Only Open-Meteo is fetched from.
    pub fn open_meteo_url(&self) -> &str {
        self.providers
            .get(OPEN_METEO)
            .map(|p| p.url.as_str())
            .unwrap_or(OPEN_METEO_URL)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Locations of the files airwx reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_file: PathBuf,
    pub airports_file: PathBuf,
    pub favorites_file: PathBuf,
}

impl AppPaths {
    /// `$AIRWX_HOME` if set, otherwise the platform config and data dirs.
    pub fn discover() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(Self::in_dir(PathBuf::from(home)));
        }

        let dirs = ProjectDirs::from("dev", "airwx", "airwx")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(Self {
            config_file: dirs.config_dir().join("config.toml"),
            airports_file: dirs.data_dir().join("airports.json"),
            favorites_file: dirs.data_dir().join("favorites.json"),
        })
    }

    /// All files side by side in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            config_file: dir.join("config.toml"),
            airports_file: dir.join("airports.json"),
            favorites_file: dir.join("favorites.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.unit, TemperatureUnit::Celsius);
        assert_eq!(cfg.open_meteo_url(), OPEN_METEO_URL);
        assert_eq!(cfg.provider_url(), OPEN_METEO_URL);
    }

    #[test]
    fn starter_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::starter().save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, Config::starter());
        assert_eq!(loaded.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(loaded.provider_url(), "https://api.weather.gov/");
        assert_eq!(loaded.open_meteo_url(), OPEN_METEO_URL);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "unit = \"F\"\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(cfg.days, 7);
        assert_eq!(cfg.provider, OPEN_METEO);
    }

    #[test]
    fn bad_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "unit = [").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn paths_in_dir() {
        let paths = AppPaths::in_dir("/tmp/airwx");
        assert_eq!(paths.airports_file, PathBuf::from("/tmp/airwx/airports.json"));
        assert_eq!(paths.favorites_file, PathBuf::from("/tmp/airwx/favorites.json"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/airwx/config.toml"));
    }
}
