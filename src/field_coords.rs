use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Coordinates for the club's known launch sites, bundled with the binary.
/// A site file on disk takes precedence when one is configured.
static DEFAULT_FIELDS_TOML: &str = include_str!("../fields.toml");

static EMBEDDED: Lazy<FieldCoordinates> = Lazy::new(|| {
    FieldCoordinates::from_toml(DEFAULT_FIELDS_TOML).expect("bundled fields.toml parses")
});

#[derive(Debug, Deserialize)]
struct FieldsFile {
    fields: HashMap<String, FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    lat: f64,
    lon: f64,
}

/// Static reference mapping of field code to (latitude, longitude).
///
/// Loaded once at startup and read-only afterwards. Fields without an
/// entry are simply absent from the geo view; they still count everywhere
/// else.
#[derive(Debug, Clone, Default)]
pub struct FieldCoordinates {
    coords: HashMap<String, (f64, f64)>,
}

impl FieldCoordinates {
    pub fn from_toml(text: &str) -> Result<Self> {
        let parsed: FieldsFile = toml::from_str(text).context("invalid field coordinates TOML")?;
        let coords = parsed
            .fields
            .into_iter()
            .map(|(name, entry)| (name, (entry.lat, entry.lon)))
            .collect();
        Ok(Self { coords })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read field coordinates from {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Load from `path` when given, otherwise fall back to the bundled table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(EMBEDDED.clone()),
        }
    }

    pub fn get(&self, field: &str) -> Option<(f64, f64)> {
        self.coords.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}
