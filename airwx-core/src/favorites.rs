//! Favorite airport codes, persisted as a JSON array.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::airport::normalize_code;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    codes: Vec<String>,
}

impl Favorites {
    /// Load favorites, or an empty list if the file doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read favorites file: {}", path.display()))?;

        let favorites: Favorites = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse favorites file: {}", path.display()))?;

        Ok(favorites)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize favorites to JSON")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write favorites file: {}", path.display()))?;

        Ok(())
    }

    /// Add a code. Returns false if it was already a favorite.
    pub fn add(&mut self, code: &str) -> bool {
        let code = normalize_code(code);
        if self.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Remove a code. Returns false if it wasn't a favorite.
    pub fn remove(&mut self, code: &str) -> bool {
        let code = normalize_code(code);
        let before = self.codes.len();
        self.codes.retain(|c| *c != code);
        self.codes.len() != before
    }

    pub fn contains(&self, code: &str) -> bool {
        let code = normalize_code(code);
        self.codes.iter().any(|c| *c == code)
    }

    /// Codes in the order they were added.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Codes in alphabetical order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
