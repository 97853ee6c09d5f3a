//! Station name autocompletion server.
//!
//! Answers "which stations match this prefix?" over a static catalog of
//! rail stations, ignoring case and spelling out German umlauts and `ß`.

pub mod autocomplete;
pub mod catalog;
pub mod config;
pub mod web;
