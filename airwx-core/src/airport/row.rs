use std::io::Read;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{AirportRecord, normalize_code};

/// Why a source row was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("airport name is empty")]
    MissingName,
    #[error("latitude {0:?} is not a finite number")]
    InvalidLatitude(String),
    #[error("longitude {0:?} is not a finite number")]
    InvalidLongitude(String),
    #[error("row has no airport code")]
    NoCodes,
}

/// One airport row in the shape shared by every data source.
///
/// Coordinates are kept as source text; they are only parsed (and the row
/// accepted or rejected) when the index is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportRow {
    /// Key the row was persisted under. Keyed rows are registered under this
    /// key only, since the persisted file is already a flat keyspace.
    pub key: Option<String>,
    pub icao_code: String,
    pub iata_code: String,
    pub local_code: String,
    pub gps_code: String,
    pub faa_lid: String,
    pub name: String,
    pub city: String,
    pub latitude: String,
    pub longitude: String,
    pub iso_country: String,
    pub iso_region: String,
    pub elevation_ft: Option<i64>,
    pub kind: String,
    pub scheduled_service: String,
}

impl AirportRow {
    /// Validate the row, returning the keys to register and the record.
    pub fn into_record(self) -> Result<(Vec<String>, AirportRecord), RowError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(RowError::MissingName);
        }

        let latitude =
            parse_coordinate(&self.latitude).ok_or(RowError::InvalidLatitude(self.latitude))?;
        let longitude =
            parse_coordinate(&self.longitude).ok_or(RowError::InvalidLongitude(self.longitude))?;

        let local_code = normalize_code(&self.local_code);
        let faa_lid = match normalize_code(&self.faa_lid) {
            lid if lid.is_empty() => local_code.clone(),
            lid => lid,
        };

        let record = AirportRecord {
            name,
            city: self.city.trim().to_string(),
            latitude,
            longitude,
            icao_code: normalize_code(&self.icao_code),
            iata_code: normalize_code(&self.iata_code),
            iso_country: self.iso_country.trim().to_string(),
            iso_region: self.iso_region.trim().to_string(),
            elevation_ft: self.elevation_ft,
            kind: self.kind.trim().to_string(),
            scheduled_service: self.scheduled_service.trim().to_string(),
            local_code,
            gps_code: normalize_code(&self.gps_code),
            faa_lid,
        };

        let keys = match self.key.as_deref().map(normalize_code) {
            Some(key) if !key.is_empty() => vec![key],
            _ => record.codes().into_iter().map(str::to_string).collect(),
        };
        if keys.is_empty() {
            return Err(RowError::NoCodes);
        }

        Ok((keys, record))
    }
}

fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Elevations show up as "13", "13.0" or blank; fractional feet are truncated.
fn parse_elevation(text: &str) -> Option<i64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

/// Rows decoded from a source, plus the number of entries that could not
/// be decoded at all.
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub rows: Vec<AirportRow>,
    pub undecodable: usize,
}

/// Column subset of the OurAirports `airports.csv` feed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvAirport {
    icao_code: String,
    iata_code: String,
    local_code: String,
    gps_code: String,
    name: String,
    municipality: String,
    latitude_deg: String,
    longitude_deg: String,
    iso_country: String,
    iso_region: String,
    elevation_ft: String,
    #[serde(rename = "type")]
    kind: String,
    scheduled_service: String,
}

impl From<CsvAirport> for AirportRow {
    fn from(csv: CsvAirport) -> Self {
        Self {
            key: None,
            faa_lid: csv.local_code.clone(),
            icao_code: csv.icao_code,
            iata_code: csv.iata_code,
            local_code: csv.local_code,
            gps_code: csv.gps_code,
            name: csv.name,
            city: csv.municipality,
            latitude: csv.latitude_deg,
            longitude: csv.longitude_deg,
            iso_country: csv.iso_country,
            iso_region: csv.iso_region,
            elevation_ft: parse_elevation(&csv.elevation_ft),
            kind: csv.kind,
            scheduled_service: csv.scheduled_service,
        }
    }
}

/// Decode a header-keyed airports CSV.
///
/// Records that fail to decode are skipped and counted; only an unreadable
/// header is an error.
pub fn parse_csv<R: Read>(reader: R) -> Result<ParsedRows> {
    let mut reader = csv::Reader::from_reader(reader);
    reader.headers().context("Failed to read airports CSV header")?;

    let mut parsed = ParsedRows::default();
    for result in reader.deserialize::<CsvAirport>() {
        match result {
            Ok(record) => parsed.rows.push(record.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping undecodable CSV record");
                parsed.undecodable += 1;
            }
        }
    }

    Ok(parsed)
}

/// Decode persisted `airports.json` text.
pub fn parse_json_str(text: &str) -> Result<ParsedRows> {
    let value: Value = serde_json::from_str(text).context("Failed to parse airports JSON")?;
    parse_json(&value)
}

/// Decode a persisted airports object (code → entry).
///
/// Entries are either full objects or legacy `[name, city, lat, lon]`
/// arrays. Anything else is counted as undecodable.
pub fn parse_json(value: &Value) -> Result<ParsedRows> {
    let entries = value
        .as_object()
        .ok_or_else(|| anyhow!("Airports JSON must be an object keyed by airport code"))?;

    let mut parsed = ParsedRows::default();
    for (code, entry) in entries {
        let row = match entry {
            Value::Object(fields) => Some(row_from_object(code, fields)),
            Value::Array(items) if items.len() >= 4 => Some(row_from_legacy(code, items)),
            _ => None,
        };

        match row {
            Some(row) => parsed.rows.push(row),
            None => {
                tracing::debug!(code = %code, "Skipping undecodable airports.json entry");
                parsed.undecodable += 1;
            }
        }
    }

    Ok(parsed)
}

fn row_from_object(code: &str, fields: &Map<String, Value>) -> AirportRow {
    let field = |key: &str| fields.get(key).map(text_of).unwrap_or_default();

    AirportRow {
        key: Some(code.to_string()),
        icao_code: field("icao_code"),
        iata_code: field("iata_code"),
        local_code: field("local_code"),
        gps_code: field("gps_code"),
        faa_lid: field("faa_lid"),
        name: field("name"),
        city: field("city"),
        latitude: field("lat"),
        longitude: field("lon"),
        iso_country: field("iso_country"),
        iso_region: field("iso_region"),
        elevation_ft: parse_elevation(&field("elevation_ft")),
        kind: field("type"),
        scheduled_service: field("scheduled_service"),
    }
}

fn row_from_legacy(code: &str, items: &[Value]) -> AirportRow {
    AirportRow {
        key: Some(code.to_string()),
        name: text_of(&items[0]),
        city: text_of(&items[1]),
        latitude: text_of(&items[2]),
        longitude: text_of(&items[3]),
        ..AirportRow::default()
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
