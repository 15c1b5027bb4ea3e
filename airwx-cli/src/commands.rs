//! Command handlers: load state, call into the core, print its lines.

use airwx_core::{
    AirportIndex, AirportRecord, AirportStore, AppPaths, Config, Favorites, ForecastRequest,
    WeatherProvider,
    airport::{fetch_airports_csv, normalize_code},
    model::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS, clamp_days},
    provider::provider_from_config,
    render::{ReportContext, ReportOptions, airport_line, render_report},
};
use anyhow::{Context, Result, bail};
use chrono::Local;
use inquire::Text;

use crate::cli::WeatherArgs;

/// Resolved file locations plus the loaded config.
pub struct App {
    paths: AppPaths,
    config: Config,
}

impl App {
    pub fn load() -> Result<Self> {
        let paths = AppPaths::discover()?;
        let config = Config::load(&paths.config_file)?;
        tracing::debug!(?paths, ?config, "Loaded configuration");
        Ok(Self { paths, config })
    }

    fn store(&self) -> AirportStore {
        AirportStore::new(&self.paths.airports_file)
    }

    fn airports(&self) -> Result<AirportIndex> {
        let (index, report) = self.store().load()?;
        if report.skipped > 0 {
            tracing::warn!(skipped = report.skipped, "Ignored invalid airports.json entries");
        }
        Ok(index)
    }

    fn favorites(&self) -> Result<Favorites> {
        Favorites::load(&self.paths.favorites_file)
    }
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{line}");
    }
}

fn forecast_days(app: &App, args: &WeatherArgs) -> u8 {
    let requested = args.days.unwrap_or(i64::from(app.config.days));
    let days = clamp_days(requested);
    if i64::from(days) != requested {
        println!(
            "Note: --days clamped to {days} (supported range: {MIN_FORECAST_DAYS}-{MAX_FORECAST_DAYS})."
        );
    }
    days
}

async fn report_for(
    app: &App,
    provider: &dyn WeatherProvider,
    code: &str,
    airport: &AirportRecord,
    args: &WeatherArgs,
    days: u8,
) -> Result<()> {
    let unit = args.unit.unwrap_or(app.config.unit);
    let request = ForecastRequest {
        latitude: airport.latitude,
        longitude: airport.longitude,
        unit,
        days,
    };

    let report = provider
        .get_forecast(&request)
        .await
        .with_context(|| format!("Could not fetch weather for {}", normalize_code(code)))?;

    let ctx = ReportContext {
        code,
        airport,
        provider: &app.config.provider,
        provider_url: app.config.provider_url(),
    };
    let options = ReportOptions {
        unit,
        show_icons: !(args.no_emoji || app.config.no_emoji),
        forecast_days: args.forecast.then_some(usize::from(days)),
        today: Local::now().date_naive(),
    };

    print_lines(render_report(&ctx, &report, &options));
    Ok(())
}

pub async fn show(app: &App, code: &str, args: &WeatherArgs) -> Result<()> {
    let days = forecast_days(app, args);
    let index = app.airports()?;
    let Some(airport) = index.lookup(code) else {
        bail!("Unknown airport code: {code}");
    };

    let provider = provider_from_config(&app.config)?;
    report_for(app, provider.as_ref(), code, airport, args, days).await
}

pub async fn favorites_weather(app: &App, args: &WeatherArgs) -> Result<()> {
    let favorites = app.favorites()?;
    if favorites.is_empty() {
        println!("No favorites set.");
        return Ok(());
    }

    let days = forecast_days(app, args);
    let index = app.airports()?;
    let provider = provider_from_config(&app.config)?;

    for code in favorites.sorted() {
        tracing::debug!(%code, "Processing favorite");
        let Some(airport) = index.lookup(code) else {
            println!("{code}: (not found in airports.json)");
            continue;
        };

        // One failing airport shouldn't hide the rest.
        if let Err(e) = report_for(app, provider.as_ref(), code, airport, args, days).await {
            println!("Error: {e:#}");
        }
    }

    Ok(())
}

pub fn add_favorite(app: &App, code: &str) -> Result<()> {
    let mut favorites = app.favorites()?;
    let code = normalize_code(code);

    if favorites.add(&code) {
        favorites.save(&app.paths.favorites_file)?;
        println!("Added {code} to favorites.");
    } else {
        println!("{code} is already a favorite.");
    }
    Ok(())
}

pub fn remove_favorite(app: &App, code: &str) -> Result<()> {
    let mut favorites = app.favorites()?;
    let code = normalize_code(code);

    if favorites.remove(&code) {
        favorites.save(&app.paths.favorites_file)?;
        println!("Removed {code} from favorites.");
    } else {
        println!("{code} is not in favorites.");
    }
    Ok(())
}

pub fn list_favorites(app: &App) -> Result<()> {
    let favorites = app.favorites()?;
    if favorites.is_empty() {
        println!("No favorites set.");
        return Ok(());
    }

    println!("Favorite airports:");
    for code in favorites.codes() {
        println!("  {code}");
    }
    Ok(())
}

pub fn list_airports(app: &App) -> Result<()> {
    let index = app.airports()?;
    if index.is_empty() {
        println!("No airports available. Run `airwx airports update` to download them.");
        return Ok(());
    }

    println!("Available airports:");
    print_lines(index.iter().map(|(code, record)| airport_line(code, record)));
    Ok(())
}

pub fn search_airports(app: &App, query: &str) -> Result<()> {
    let index = app.airports()?;
    let mut found = false;

    for (code, record) in index.search(query) {
        println!("{}", airport_line(code, record));
        found = true;
    }
    if !found {
        println!("No airports found matching query.");
    }
    Ok(())
}

pub fn add_airport(app: &App) -> Result<()> {
    println!("Add a custom airport:");
    let code = normalize_code(&Text::new("Airport code (3-4 letters):").prompt()?);
    let name = Text::new("Airport name:").prompt()?;
    let city = Text::new("City:").prompt()?;
    let lat = Text::new("Latitude:").prompt()?;
    let lon = Text::new("Longitude:").prompt()?;

    if code.is_empty() {
        println!("Airport code is required.");
        return Ok(());
    }
    let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
        println!("Invalid latitude or longitude.");
        return Ok(());
    };
    if !lat.is_finite() || !lon.is_finite() {
        println!("Invalid latitude or longitude.");
        return Ok(());
    }

    let mut index = app.airports()?;
    let record = AirportRecord::custom(&code, &name, &city, lat, lon);
    let summary = format!("{code}: {} ({})", record.name, record.city);
    index.upsert(&code, record);
    app.store().save(&index)?;

    println!("Added custom airport {summary}");
    Ok(())
}

pub async fn update_airports(app: &App, url: &str) -> Result<()> {
    println!("Downloading airports.csv from OurAirports...");
    let parsed = fetch_airports_csv(url).await?;
    let undecodable = parsed.undecodable;

    let (index, report) = AirportIndex::build_from_rows(parsed.rows);
    let store = app.store();
    store.save(&index)?;

    println!(
        "Updated {} with {} airport codes ({} rows skipped).",
        store.path().display(),
        index.len(),
        report.skipped + undecodable
    );
    Ok(())
}

pub fn setup(app: &App) -> Result<()> {
    let path = &app.paths.config_file;
    if path.exists() {
        println!("{} already exists", path.display());
        return Ok(());
    }

    Config::starter().save(path)?;
    println!("Created default config at {}", path.display());
    Ok(())
}
