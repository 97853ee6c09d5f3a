//! The autocomplete lookup: validate, search, format.

use tracing::debug;

use super::config::QueryLimits;
use super::format::format_stations;
use super::index::PrefixIndex;
use super::validate::{QueryError, validate_query};
use crate::catalog::{CatalogError, StationSource};

/// Errors returned by [`Autocomplete::lookup`].
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The query was rejected before searching
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The station index could not be built
    #[error("internal failure: {0}")]
    Internal(#[from] CatalogError),
}

/// Station name autocompletion over a lazily built prefix index.
#[derive(Debug)]
pub struct Autocomplete {
    index: PrefixIndex,
    limits: QueryLimits,
}

impl Autocomplete {
    /// Create an engine over `source` with the given query limits.
    pub fn new(source: impl StationSource, limits: QueryLimits) -> Self {
        Self {
            index: PrefixIndex::new(source),
            limits,
        }
    }

    /// Look up display strings for stations matching `raw_query`.
    ///
    /// The query is validated and trimmed, then matched as a prefix against
    /// every normalized word of every station name. Each result has the
    /// form `"<id> - <short code> - <name>"`.
    pub async fn lookup(&self, raw_query: &str) -> Result<Vec<String>, LookupError> {
        let query = validate_query(raw_query, &self.limits)?;
        let matches = self.index.search(query).await?;

        debug!(query, found = matches.len(), "autocomplete lookup");
        Ok(format_stations(matches))
    }

    /// Build the index now rather than on the first lookup.
    pub async fn preload(&self) -> Result<(), CatalogError> {
        self.index.ensure_built().await
    }

    /// The underlying prefix index.
    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    /// The configured query limits.
    pub fn limits(&self) -> QueryLimits {
        self.limits
    }
}
