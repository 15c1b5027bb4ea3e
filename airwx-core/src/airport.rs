//! Airport identifier resolution.
//!
//! One physical airport can be known by several codes (ICAO, IATA, local,
//! GPS). The [`AirportIndex`] flattens all of them into a single uppercase
//! keyspace where every key maps to a full copy of the [`AirportRecord`].
//!
//! Rows arrive either from the OurAirports CSV feed or from the persisted
//! `airports.json`; both are normalised into [`AirportRow`] before the index
//! sees them.

mod feed;
mod index;
mod record;
mod row;
mod store;

pub use feed::{OURAIRPORTS_CSV_URL, fetch_airports_csv};
pub use index::{AirportIndex, BuildReport};
pub use record::AirportRecord;
pub use row::{AirportRow, ParsedRows, RowError, parse_csv, parse_json, parse_json_str};
pub use store::AirportStore;

/// Canonical form of a user-supplied code: trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
