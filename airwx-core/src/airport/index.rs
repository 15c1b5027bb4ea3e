//! Flat code → airport mapping.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use super::{AirportRecord, AirportRow, normalize_code};

/// Outcome counters of [`AirportIndex::build_from_rows`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Rows that produced a record.
    pub accepted: usize,
    /// Rows dropped for a missing name, bad coordinates or no codes.
    pub skipped: usize,
    /// Codes ignored because an earlier row already claimed them.
    pub shadowed: usize,
}

/// Index of airports keyed by uppercase code.
///
/// Iteration (and therefore listing, searching and the persisted file) is
/// ordered by code.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AirportIndex {
    airports: BTreeMap<String, AirportRecord>,
}

impl AirportIndex {
    /// Create an empty airport index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from normalised rows.
    ///
    /// Invalid rows are dropped and counted. Within one build the first row
    /// to claim a code keeps it; later rows never shadow it.
    pub fn build_from_rows<I>(rows: I) -> (Self, BuildReport)
    where
        I: IntoIterator<Item = AirportRow>,
    {
        let mut index = Self::new();
        let mut report = BuildReport::default();

        for row in rows {
            let (keys, record) = match row.into_record() {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping airport row");
                    report.skipped += 1;
                    continue;
                }
            };
            report.accepted += 1;

            for key in keys {
                match index.airports.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(record.clone());
                    }
                    Entry::Occupied(slot) => {
                        tracing::debug!(code = %slot.key(), "Code already claimed, keeping first");
                        report.shadowed += 1;
                    }
                }
            }
        }

        tracing::info!(
            keys = index.len(),
            accepted = report.accepted,
            skipped = report.skipped,
            shadowed = report.shadowed,
            "Built airport index"
        );

        (index, report)
    }

    /// Exact, case-insensitive lookup.
    pub fn lookup(&self, code: &str) -> Option<&AirportRecord> {
        self.airports.get(&normalize_code(code))
    }

    /// Replace whatever is stored at `code`, leaving sibling codes alone.
    ///
    /// Returns the previous record at that key, if any.
    pub fn upsert(&mut self, code: &str, record: AirportRecord) -> Option<AirportRecord> {
        self.airports.insert(normalize_code(code), record)
    }

    /// Case-insensitive substring search over code, name, city, country,
    /// region, type, scheduled service and the local/GPS/FAA codes.
    ///
    /// The iterator borrows the index and can be recreated at will.
    pub fn search<'a>(
        &'a self,
        query: &str,
    ) -> impl Iterator<Item = (&'a str, &'a AirportRecord)> + 'a {
        let query = query.to_lowercase();
        self.iter()
            .filter(move |(code, record)| record.haystack(code).contains(&query))
    }

    /// All `(code, record)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AirportRecord)> {
        self.airports.iter().map(|(code, record)| (code.as_str(), record))
    }

    /// Returns the number of keys in the index.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::{parse_csv, parse_json_str};

    fn row(icao: &str, iata: &str, name: &str, lat: &str, lon: &str) -> AirportRow {
        AirportRow {
            icao_code: icao.into(),
            iata_code: iata.into(),
            name: name.into(),
            latitude: lat.into(),
            longitude: lon.into(),
            ..AirportRow::default()
        }
    }

    fn jfk() -> AirportRow {
        AirportRow {
            city: "New York".into(),
            ..row("KJFK", "JFK", "John F Kennedy", "40.6398", "-73.7789")
        }
    }

    #[test]
    fn test_empty_index() {
        let index = AirportIndex::new();
        assert!(index.is_empty());
        assert!(index.lookup("KJFK").is_none());
        assert_eq!(index.search("jfk").count(), 0);
    }

    #[test]
    fn icao_and_iata_resolve_to_equal_records() {
        let (index, report) = AirportIndex::build_from_rows([jfk()]);

        assert_eq!(report.accepted, 1);
        assert_eq!(index.len(), 2);

        let by_icao = index.lookup("KJFK").unwrap();
        let by_iata = index.lookup("JFK").unwrap();
        assert_eq!(by_icao, by_iata);
        assert_eq!(by_icao.name, "John F Kennedy");
        assert_eq!(by_icao.city, "New York");
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let (index, _) = AirportIndex::build_from_rows([jfk()]);

        assert!(index.lookup("kjfk").is_some());
        assert!(index.lookup(" jFk ").is_some());
        assert!(index.lookup("KJF").is_none());
    }

    #[test]
    fn invalid_rows_are_counted_not_fatal() {
        let rows = [
            jfk(),
            row("XXXX", "", "", "1", "2"),
            row("YYYY", "", "Bad", "north", "2"),
            row("ZZZZ", "", "Bad", "1", "NaN"),
        ];
        let (index, report) = AirportIndex::build_from_rows(rows);

        assert_eq!(report.accepted, 1);
        assert_eq!(report.skipped, 3);
        assert!(index.lookup("XXXX").is_none());
        assert!(index.lookup("ZZZZ").is_none());
    }

    #[test]
    fn first_occurrence_wins() {
        let rows = [
            jfk(),
            row("KJFK", "", "Impostor", "0", "0"),
            row("KXYZ", "JFK", "Shadow", "1", "1"),
        ];
        let (index, report) = AirportIndex::build_from_rows(rows);

        assert_eq!(report.accepted, 3);
        assert_eq!(report.shadowed, 2);
        assert_eq!(index.lookup("KJFK").unwrap().name, "John F Kennedy");
        assert_eq!(index.lookup("JFK").unwrap().name, "John F Kennedy");
        assert_eq!(index.lookup("KXYZ").unwrap().name, "Shadow");
    }

    #[test]
    fn upsert_touches_only_one_key() {
        let (mut index, _) = AirportIndex::build_from_rows([jfk()]);
        let custom = AirportRecord::custom("jfk", "Custom", "Queens", 1.0, 2.0);

        let previous = index.upsert("jfk", custom);

        assert_eq!(previous.unwrap().name, "John F Kennedy");
        assert_eq!(index.lookup("JFK").unwrap().name, "Custom");
        assert_eq!(index.lookup("KJFK").unwrap().name, "John F Kennedy");
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let mut heli = row("", "", "Total RF Heliport", "40.07", "-74.93");
        heli.local_code = "00A".into();
        heli.kind = "heliport".into();
        let (index, _) = AirportIndex::build_from_rows([jfk(), heli]);

        let codes: Vec<&str> = index.search("new york").map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["JFK", "KJFK"]);

        let codes: Vec<&str> = index.search("HELIPORT").map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["00A"]);

        assert_eq!(index.search("").count(), 3);
        assert_eq!(index.search("nowhere").count(), 0);

        // restartable
        let search = || index.search("kennedy").count();
        assert_eq!(search(), search());
    }

    #[test]
    fn persisted_round_trip_preserves_lookups() {
        let csv = "\
ident,type,name,latitude_deg,longitude_deg,elevation_ft,iso_country,iso_region,municipality,scheduled_service,icao_code,iata_code,gps_code,local_code
KJFK,large_airport,John F Kennedy International Airport,40.639447,-73.779317,13,US,US-NY,New York,yes,KJFK,JFK,KJFK,JFK
00A,heliport,Total RF Heliport,40.070985,-74.933689,11,US,US-PA,Bensalem,no,,,K00A,00A
EGLL,large_airport,London Heathrow Airport,51.4706,-0.461941,83,GB,GB-ENG,London,yes,EGLL,LHR,EGLL,
";
        let parsed = parse_csv(csv.as_bytes()).unwrap();
        let (original, _) = AirportIndex::build_from_rows(parsed.rows);

        let text = serde_json::to_string_pretty(&original).unwrap();
        let reparsed = parse_json_str(&text).unwrap();
        assert_eq!(reparsed.undecodable, 0);
        let (reloaded, report) = AirportIndex::build_from_rows(reparsed.rows);

        assert_eq!(report.skipped, 0);
        assert_eq!(reloaded, original);
        for (code, record) in original.iter() {
            assert_eq!(reloaded.lookup(code), Some(record), "code {code}");
        }
    }
}
