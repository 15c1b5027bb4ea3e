use anyhow::{Context, Result, anyhow};
use reqwest::Client;

use super::{ParsedRows, parse_csv};

/// Public OurAirports dump.
pub const OURAIRPORTS_CSV_URL: &str = "https://davidmegginson.github.io/ourairports-data/airports.csv";

/// Download and decode the OurAirports CSV.
pub async fn fetch_airports_csv(url: &str) -> Result<ParsedRows> {
    tracing::debug!(%url, "Downloading airports CSV");

    let res = Client::new()
        .get(url)
        .send()
        .await
        .context("Failed to send request for airports CSV")?;

    let status = res.status();
    if !status.is_success() {
        return Err(anyhow!("Airports CSV download failed with status {status}"));
    }

    let body = res
        .bytes()
        .await
        .context("Failed to read airports CSV body")?;

    let parsed = parse_csv(&body[..])?;
    tracing::info!(
        rows = parsed.rows.len(),
        undecodable = parsed.undecodable,
        "Decoded airports CSV"
    );

    Ok(parsed)
}
