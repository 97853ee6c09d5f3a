//! Data transfer objects for web responses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Response for a successful autocomplete lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutoCompleteResponse {
    /// Matching stations as `"<id> - <short code> - <name>"`
    pub station_list: Vec<String>,

    /// Lookup duration, e.g. `"0.4 ms"`
    pub time_taken: String,

    /// Number of entries in `station_list`, as a string
    pub number_of_stations_found: String,
}

impl AutoCompleteResponse {
    /// Create from lookup results and the time the lookup took.
    pub fn new(station_list: Vec<String>, elapsed: Duration) -> Self {
        let number_of_stations_found = station_list.len().to_string();
        Self {
            station_list,
            time_taken: format_elapsed(elapsed),
            number_of_stations_found,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. `"001"`, `"500"`)
    pub error_code: String,

    /// Human-readable description
    pub error_description: String,
}

impl ErrorResponse {
    /// Create an error response.
    pub fn new(error_code: impl Into<String>, error_description: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            error_description: error_description.into(),
        }
    }
}

/// Format a duration as milliseconds with one decimal.
fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1} ms", elapsed.as_secs_f64() * 1000.0)
}
