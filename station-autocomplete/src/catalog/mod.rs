//! Station catalog: records and the sources they are loaded from.
//!
//! The catalog is read once per process by the prefix index. The CSV
//! source reads the Deutsche Bahn station export; the static source serves
//! an in-memory list.

mod csv_source;
mod error;
mod record;
mod source;

pub use csv_source::{CsvStationSource, DEFAULT_CATALOG_PATH, parse_stations};
pub use error::CatalogError;
pub use record::StationRecord;
pub use source::{StaticStationSource, StationSource};
