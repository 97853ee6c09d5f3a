//! Query length limits for autocomplete lookups.

/// Default minimum query length, in characters.
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 3;

/// Default maximum query length, in characters.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 50;

/// Bounds on the trimmed length of an accepted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Shortest accepted query (inclusive).
    pub min_length: usize,

    /// Longest accepted query (inclusive).
    pub max_length: usize,
}

impl QueryLimits {
    /// Create limits with the given bounds.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_QUERY_LENGTH,
            max_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}
