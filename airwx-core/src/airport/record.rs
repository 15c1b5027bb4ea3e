use serde::Serialize;

use super::normalize_code;

/// Canonical airport entity.
///
/// Serialises to the persisted `airports.json` entry shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportRecord {
    pub name: String,
    pub city: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub icao_code: String,
    pub iata_code: String,
    pub iso_country: String,
    pub iso_region: String,
    pub elevation_ft: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub scheduled_service: String,
    pub local_code: String,
    pub gps_code: String,
    pub faa_lid: String,
}

impl AirportRecord {
    /// Record for a user-entered airport.
    ///
    /// A four letter code is taken as ICAO, a three letter code as IATA.
    pub fn custom(code: &str, name: &str, city: &str, latitude: f64, longitude: f64) -> Self {
        let code = normalize_code(code);
        let len = code.chars().count();

        Self {
            name: name.trim().to_string(),
            city: city.trim().to_string(),
            latitude,
            longitude,
            icao_code: if len == 4 { code.clone() } else { String::new() },
            iata_code: if len == 3 { code } else { String::new() },
            iso_country: String::new(),
            iso_region: String::new(),
            elevation_ft: None,
            kind: "custom_airport".to_string(),
            scheduled_service: String::new(),
            local_code: String::new(),
            gps_code: String::new(),
            faa_lid: String::new(),
        }
    }

    /// Distinct, non-empty index keys in registration order:
    /// ICAO, IATA, local code, GPS code.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::with_capacity(4);
        for code in [&self.icao_code, &self.iata_code, &self.local_code, &self.gps_code] {
            let code = code.as_str();
            if !code.is_empty() && !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// `"region, country"` with empty parts left out.
    pub fn region_summary(&self) -> String {
        [self.iso_region.as_str(), self.iso_country.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"ICAO KJFK, IATA JFK"`; the FAA LID stands in when there is no IATA code.
    pub fn code_summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.icao_code.is_empty() {
            parts.push(format!("ICAO {}", self.icao_code));
        }
        if !self.iata_code.is_empty() {
            parts.push(format!("IATA {}", self.iata_code));
        } else if !self.faa_lid.is_empty() {
            parts.push(format!("FAA {}", self.faa_lid));
        }
        parts.join(", ")
    }

    /// Lowercased text searched by [`AirportIndex::search`](super::AirportIndex::search).
    pub(crate) fn haystack(&self, code: &str) -> String {
        [
            code,
            self.name.as_str(),
            self.city.as_str(),
            self.iso_country.as_str(),
            self.iso_region.as_str(),
            self.kind.as_str(),
            self.scheduled_service.as_str(),
            self.local_code.as_str(),
            self.gps_code.as_str(),
            self.faa_lid.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}
