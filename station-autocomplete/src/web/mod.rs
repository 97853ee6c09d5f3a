//! Web layer for station autocompletion.
//!
//! Provides the `/api/v1/auto-complete/:query` endpoint and maps lookup
//! errors to status codes and JSON bodies.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
