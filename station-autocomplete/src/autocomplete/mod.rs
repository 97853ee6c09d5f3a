//! Station name autocompletion.
//!
//! Answers "which stations have a name word starting with this prefix?",
//! comparing case-insensitively and with `ß`, `ö` and `ü` spelled out, so
//! `"muen"`, `"Mün"` and `"MÜN"` all find "München Hbf".
//!
//! The pieces, bottom-up:
//! - [`normalize`] turns text into a matching key
//! - [`validate_query`] gates raw queries
//! - [`PrefixIndex`] loads the catalog once and answers prefix searches
//! - [`Autocomplete`] ties them together behind a single `lookup`

mod config;
mod engine;
mod format;
mod index;
mod normalize;
mod validate;

pub use config::{DEFAULT_MAX_QUERY_LENGTH, DEFAULT_MIN_QUERY_LENGTH, QueryLimits};
pub use engine::{Autocomplete, LookupError};
pub use format::{format_station, format_stations};
pub use index::PrefixIndex;
pub use normalize::normalize;
pub use validate::{QueryError, validate_query};
