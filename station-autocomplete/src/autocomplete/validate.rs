//! Validation of raw autocomplete queries.
//!
//! Checks run in a fixed order and the first failure wins: emptiness,
//! character set, then the length bounds.

use super::config::QueryLimits;

/// Reasons a raw query is rejected before it reaches the index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Nothing left after trimming
    #[error("Empty query string passed.")]
    EmptyQuery,

    /// Something other than letters, German umlauts, `ß` or whitespace
    #[error("Alphanumeric characters are not allowed.")]
    InvalidCharacter,

    /// Fewer characters than the configured minimum
    #[error("Query must contain at least {min} characters.")]
    QueryTooShort { min: usize },

    /// More characters than the configured maximum
    #[error("Query must not exceed {max} characters.")]
    QueryTooLong { max: usize },
}

impl QueryError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidCharacter => "001",
            QueryError::QueryTooShort { .. } => "002",
            QueryError::QueryTooLong { .. } => "003",
            QueryError::EmptyQuery => "004",
        }
    }
}

/// Whether `ch` may appear in a query.
fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'ä' | 'ö' | 'ü' | 'Ä' | 'Ö' | 'Ü' | 'ß') || ch.is_whitespace()
}

/// Validate a raw query against `limits`.
///
/// On success returns the trimmed query, which is what should be searched.
pub fn validate_query<'a>(raw: &'a str, limits: &QueryLimits) -> Result<&'a str, QueryError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    if !trimmed.chars().all(is_allowed_char) {
        return Err(QueryError::InvalidCharacter);
    }

    // Lengths are in characters; umlauts are two bytes each.
    let length = trimmed.chars().count();

    if length < limits.min_length {
        return Err(QueryError::QueryTooShort {
            min: limits.min_length,
        });
    }

    if length > limits.max_length {
        return Err(QueryError::QueryTooLong {
            max: limits.max_length,
        });
    }

    Ok(trimmed)
}
