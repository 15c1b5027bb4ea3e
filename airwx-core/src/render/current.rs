//! Single-airport weather report: header, current conditions and an
//! optional forecast table.

use chrono::NaiveDate;

use crate::airport::AirportRecord;
use crate::model::{CurrentConditions, TemperatureUnit, WeatherReport};

use super::{TableOptions, format_value, render_forecast_table};

const BANNER_WIDTH: usize = 40;
const RULE_WIDTH: usize = 80;
const KNOTS_TO_MPH: f64 = 1.15078;

/// What the report is about.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Code the user asked for, shown uppercased.
    pub code: &'a str,
    pub airport: &'a AirportRecord,
    pub provider: &'a str,
    pub provider_url: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub unit: TemperatureUnit,
    pub show_icons: bool,
    /// Append a forecast table of this many days.
    pub forecast_days: Option<usize>,
    /// Local date used to pick today's sunrise and sunset.
    pub today: NaiveDate,
}

/// Render the full report for one airport.
pub fn render_report(
    ctx: &ReportContext<'_>,
    report: &WeatherReport,
    options: &ReportOptions,
) -> Vec<String> {
    let banner = "=".repeat(BANNER_WIDTH);
    let airport = ctx.airport;

    let mut lines = vec![String::new(), banner.clone()];
    lines.push(format!(
        "Weather for {} - {} ({})",
        ctx.code.to_uppercase(),
        airport.name,
        airport.city
    ));

    let codes = airport.code_summary();
    if !codes.is_empty() {
        lines.push(format!("Codes: {codes}"));
    }
    let region = airport.region_summary();
    if !region.is_empty() {
        lines.push(format!("Region: {region}"));
    }
    lines.push(format!(
        "Location: lat {:.4}, lon {:.4}",
        airport.latitude, airport.longitude
    ));
    lines.push(format!("Source: {} ({})", ctx.provider, ctx.provider_url));
    lines.push(banner.clone());

    match &report.current {
        Some(current) => current_lines(&mut lines, current, report, options),
        None => lines.push("No current weather data available.".to_string()),
    }

    if let Some(days) = options.forecast_days {
        let shown = days.min(report.daily.len());
        lines.push(String::new());
        lines.push(format!("{shown}-Day Forecast:"));
        lines.push("-".repeat(RULE_WIDTH));
        lines.extend(render_forecast_table(
            &report.daily,
            &TableOptions {
                unit_symbol: options.unit.symbol(),
                show_icons: options.show_icons,
                day_count: shown,
            },
        ));
    }

    lines.push(banner);
    lines.push(String::new());
    lines
}

fn current_lines(
    lines: &mut Vec<String>,
    current: &CurrentConditions,
    report: &WeatherReport,
    options: &ReportOptions,
) {
    let symbol = options.unit.symbol();
    let unit = |variable: &str, fallback: &'static str| report.current_unit(variable, fallback).to_string();
    let value = format_value;

    lines.push(format!(
        "Current:  {}",
        current.condition().display(options.show_icons)
    ));
    lines.push(format!("  Temp:    {}{symbol}", value(current.temperature)));
    lines.push(format!("  Feels:   {}{symbol}", value(current.feels_like)));
    lines.push(format!(
        "  Humid:   {}{}",
        value(current.humidity),
        unit("relative_humidity_2m", "%")
    ));
    lines.push(format!("  DewPt:   {}{symbol}", value(current.dew_point)));

    let mut wind_speed = format!("{} kt", value(current.wind_speed_kt));
    if options.unit == TemperatureUnit::Fahrenheit {
        if let Some(knots) = current.wind_speed_kt {
            wind_speed.push_str(&format!(" / {:.1} mph", knots * KNOTS_TO_MPH));
        }
    }
    lines.push(format!(
        "  Wind:    {}° at {wind_speed} (gusts {} kt)",
        value(current.wind_direction),
        value(current.wind_gusts_kt)
    ));

    lines.push(format!(
        "  Cloud:   {}{}",
        value(current.cloud_cover),
        unit("cloud_cover", "%")
    ));
    lines.push(format!(
        "  Vis:     {}{}",
        value(current.visibility),
        unit("visibility", "m")
    ));
    lines.push(format!(
        "  UV:      {}{}",
        value(current.uv_index),
        unit("uv_index", "")
    ));
    lines.push(format!(
        "  Press:   {} {} (surface {} {})",
        value(current.pressure_msl),
        unit("pressure_msl", "hPa"),
        value(current.surface_pressure),
        unit("surface_pressure", "hPa")
    ));
    lines.push(format!(
        "  Precip:  {}{} (rain {}, showers {}, snow {})",
        value(current.precipitation),
        unit("precipitation", "mm"),
        value(current.rain),
        value(current.showers),
        value(current.snowfall)
    ));
    lines.push(format!(
        "  Time:    {}",
        current.time.as_deref().unwrap_or(super::MISSING)
    ));

    if let Some((sunrise, sunset)) = report.daily.sun_times(options.today) {
        lines.push(format!("  Sunrise: {sunrise}  Sunset: {sunset}"));
    }
}
