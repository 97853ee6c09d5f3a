//! Display formatting for matched stations.

use crate::catalog::StationRecord;

/// Format a station as `"<id> - <short code> - <name>"`.
pub fn format_station(station: &StationRecord) -> String {
    format!("{} - {} - {}", station.id, station.short_code, station.name)
}

/// Format stations for display, preserving order.
pub fn format_stations<'a>(stations: impl IntoIterator<Item = &'a StationRecord>) -> Vec<String> {
    stations.into_iter().map(format_station).collect()
}
