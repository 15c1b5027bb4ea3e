use std::path::PathBuf;

use airwx_core::TemperatureUnit;
use clap::{Args, Parser, Subcommand};

use crate::commands::{self, App};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "airwx", version, about = "Weather by airport code (ICAO/IATA)")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write log output to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that fetches weather.
#[derive(Debug, Clone, Args)]
pub struct WeatherArgs {
    /// Show the multi-day forecast table.
    #[arg(short, long)]
    pub forecast: bool,

    /// Number of forecast days (1-16); defaults to the configured value.
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Temperature unit, C or F; overrides the config file.
    #[arg(long)]
    pub unit: Option<TemperatureUnit>,

    /// Disable emoji in weather output.
    #[arg(long)]
    pub no_emoji: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for an airport code (e.g. JFK, KJFK).
    Show {
        /// ICAO, IATA, local or GPS code.
        code: String,

        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Manage favorite airports.
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Browse and maintain the airport database.
    #[command(subcommand)]
    Airports(AirportsCommand),

    /// Create a default config file.
    Setup,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Add an airport code to your favorites.
    Add { code: String },

    /// Remove an airport code from your favorites.
    Remove { code: String },

    /// List your favorite airports.
    List,

    /// Show weather for every favorite airport.
    Weather {
        #[command(flatten)]
        weather: WeatherArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum AirportsCommand {
    /// List all known airport codes.
    List,

    /// Search airports by code, name, city, region or type.
    Search { query: String },

    /// Add a custom airport interactively.
    Add,

    /// Replace the airport database with current OurAirports data.
    Update {
        /// Alternate CSV location.
        #[arg(long, default_value = airwx_core::airport::OURAIRPORTS_CSV_URL)]
        url: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let app = App::load()?;

        match self.command {
            Command::Show { code, weather } => commands::show(&app, &code, &weather).await,
            Command::Favorites(cmd) => match cmd {
                FavoritesCommand::Add { code } => commands::add_favorite(&app, &code),
                FavoritesCommand::Remove { code } => commands::remove_favorite(&app, &code),
                FavoritesCommand::List => commands::list_favorites(&app),
                FavoritesCommand::Weather { weather } => {
                    commands::favorites_weather(&app, &weather).await
                }
            },
            Command::Airports(cmd) => match cmd {
                AirportsCommand::List => commands::list_airports(&app),
                AirportsCommand::Search { query } => commands::search_airports(&app, &query),
                AirportsCommand::Add => commands::add_airport(&app),
                AirportsCommand::Update { url } => commands::update_airports(&app, &url).await,
            },
            Command::Setup => commands::setup(&app),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_weather_flags() {
        let cli = Cli::parse_from(["airwx", "show", "jfk", "-f", "--days", "3", "--unit", "f"]);
        let Command::Show { code, weather } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(code, "jfk");
        assert!(weather.forecast);
        assert_eq!(weather.days, Some(3));
        assert_eq!(weather.unit, Some(TemperatureUnit::Fahrenheit));
        assert!(!weather.no_emoji);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["airwx", "favorites", "weather", "--no-emoji", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Command::Favorites(FavoritesCommand::Weather { ref weather }) if weather.no_emoji
        ));
    }

    #[test]
    fn negative_days_parse_for_clamping() {
        let cli = Cli::parse_from(["airwx", "show", "LHR", "--days", "-2"]);
        let Command::Show { weather, .. } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(weather.days, Some(-2));
    }

    #[test]
    fn bad_unit_is_rejected() {
        assert!(Cli::try_parse_from(["airwx", "show", "LHR", "--unit", "K"]).is_err());
    }
}
