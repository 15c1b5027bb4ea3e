use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{AirportIndex, BuildReport, parse_json_str};

/// `airports.json` on disk.
#[derive(Debug, Clone)]
pub struct AirportStore {
    path: PathBuf,
}

impl AirportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index, or an empty one if the file doesn't exist yet.
    pub fn load(&self) -> Result<(AirportIndex, BuildReport)> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No airports file, starting empty");
            return Ok((AirportIndex::new(), BuildReport::default()));
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read airports file: {}", self.path.display()))?;

        let parsed = parse_json_str(&contents)
            .with_context(|| format!("Failed to parse airports file: {}", self.path.display()))?;

        let (index, mut report) = AirportIndex::build_from_rows(parsed.rows);
        report.skipped += parsed.undecodable;

        Ok((index, report))
    }

    /// Save the index, creating parent directories as needed.
    pub fn save(&self, index: &AirportIndex) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(index).context("Failed to serialize airports to JSON")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write airports file: {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), keys = index.len(), "Saved airports");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::AirportRecord;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AirportStore::new(dir.path().join("airports.json"));

        let (index, report) = store.load().unwrap();
        assert!(index.is_empty());
        assert_eq!(report, BuildReport::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = AirportStore::new(dir.path().join("nested").join("airports.json"));

        let mut index = AirportIndex::new();
        index.upsert("kjfk", AirportRecord::custom("KJFK", "John F Kennedy", "New York", 40.6398, -73.7789));
        index.upsert("XYZ", AirportRecord::custom("ABCD", "Elsewhere", "", -1.5, 2.25));
        store.save(&index).unwrap();

        let (loaded, report) = store.load().unwrap();
        assert_eq!(report.skipped, 0);
        assert_eq!(loaded, index);
        assert_eq!(loaded.lookup("XYZ").unwrap().icao_code, "ABCD");
        assert!(loaded.lookup("ABCD").is_none());
    }

    #[test]
    fn legacy_and_broken_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airports.json");
        fs::write(
            &path,
            r#"{"sfo": ["San Francisco Intl", "San Francisco", 37.619, -122.375], "BAD": 42}"#,
        )
        .unwrap();

        let (index, report) = AirportStore::new(&path).load().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(index.lookup("SFO").unwrap().city, "San Francisco");
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airports.json");
        fs::write(&path, "not json").unwrap();

        let err = AirportStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse airports file"));
    }
}
