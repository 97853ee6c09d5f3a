//! Station records.

/// One station of the catalog.
///
/// Only `name` takes part in matching; the other fields are carried through
/// for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// External station identifier (EVA number).
    pub id: String,

    /// Short operational code (DS100).
    pub short_code: String,

    /// Display name, possibly several words.
    pub name: String,

    /// Traffic category (e.g. "FV", "RV", "nur DPN").
    pub traffic_type: String,

    /// `None` when absent or unparseable in the source.
    pub longitude: Option<f64>,

    /// `None` when absent or unparseable in the source.
    pub latitude: Option<f64>,
}

impl StationRecord {
    /// Create a record with only the fields used for matching and display.
    pub fn new(
        id: impl Into<String>,
        short_code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            short_code: short_code.into(),
            name: name.into(),
            traffic_type: String::new(),
            longitude: None,
            latitude: None,
        }
    }

    /// Whitespace-delimited words of the name.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.name.split_whitespace()
    }
}
