//! Station catalog read from a semicolon-separated CSV file.
//!
//! The expected layout is the Deutsche Bahn station export:
//!
//! ```text
//! EVA_NR;DS100;NAME;VERKEHR;LAENGE;BREITE
//! 8011160;BLS;Berlin Hbf;FV;13,369545;52,525592
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::CatalogError;
use super::record::StationRecord;
use super::source::StationSource;

/// Default location of the catalog file.
pub const DEFAULT_CATALOG_PATH: &str = "data/stations.csv";

/// Columns that must be present in the header.
const REQUIRED_COLUMNS: [&str; 2] = ["EVA_NR", "NAME"];

/// One raw CSV row.
///
/// A row cut short keeps defaults for its missing trailing fields; a row
/// without a name is dropped when the index is built.
#[derive(Debug, Deserialize)]
struct StationRow {
    #[serde(rename = "EVA_NR")]
    id: String,
    #[serde(rename = "DS100", default)]
    short_code: String,
    #[serde(rename = "NAME", default)]
    name: String,
    #[serde(rename = "VERKEHR", default)]
    traffic_type: String,
    #[serde(rename = "LAENGE", default)]
    longitude: String,
    #[serde(rename = "BREITE", default)]
    latitude: String,
}

impl From<StationRow> for StationRecord {
    fn from(row: StationRow) -> Self {
        StationRecord {
            id: row.id,
            short_code: row.short_code,
            name: row.name,
            traffic_type: row.traffic_type,
            longitude: parse_coordinate(&row.longitude),
            latitude: parse_coordinate(&row.latitude),
        }
    }
}

/// Parse a coordinate, accepting a decimal comma.
///
/// Returns `None` for empty, unparseable or non-finite values.
fn parse_coordinate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse station records from CSV content.
pub fn parse_stations(reader: impl Read) -> Result<Vec<StationRecord>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(CatalogError::MissingColumn { column });
    }

    let mut stations = Vec::new();
    for row in csv_reader.deserialize::<StationRow>() {
        stations.push(row?.into());
    }

    Ok(stations)
}

/// Station source backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvStationSource {
    path: PathBuf,
}

impl CsvStationSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CsvStationSource {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }
}

impl StationSource for CsvStationSource {
    fn load(&self) -> Result<Vec<StationRecord>, CatalogError> {
        let file = File::open(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        parse_stations(file)
    }
}
