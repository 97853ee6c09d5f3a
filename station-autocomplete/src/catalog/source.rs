//! The station source abstraction.

use super::error::CatalogError;
use super::record::StationRecord;

/// Trait for loading the full station catalog.
///
/// The prefix index calls `load` once, on a blocking thread, the first time a
/// lookup needs it. Implementations may block on file or network I/O.
pub trait StationSource: Send + Sync + 'static {
    /// Load every station record.
    fn load(&self) -> Result<Vec<StationRecord>, CatalogError>;
}

/// A source serving a fixed, in-memory list of stations.
#[derive(Debug, Clone, Default)]
pub struct StaticStationSource {
    stations: Vec<StationRecord>,
}

impl StaticStationSource {
    /// Create a source serving `stations`.
    pub fn new(stations: Vec<StationRecord>) -> Self {
        Self { stations }
    }
}

impl StationSource for StaticStationSource {
    fn load(&self) -> Result<Vec<StationRecord>, CatalogError> {
        Ok(self.stations.clone())
    }
}
