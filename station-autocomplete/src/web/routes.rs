//! HTTP route handlers.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::autocomplete::{LookupError, QueryError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/auto-complete/:query",
            get(auto_complete).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/auto-complete",
            get(auto_complete_empty).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/auto-complete/",
            get(auto_complete_empty).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Autocomplete station names for a query.
async fn auto_complete(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<AutoCompleteResponse>, AppError> {
    let started = Instant::now();
    let stations = state.autocomplete.lookup(&query).await?;

    Ok(Json(AutoCompleteResponse::new(stations, started.elapsed())))
}

/// The autocomplete route without a query segment.
async fn auto_complete_empty() -> AppError {
    AppError::BadRequest(QueryError::EmptyQuery)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(QueryError),
    NotFound,
    MethodNotAllowed,
    Internal { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::Query(query) => AppError::BadRequest(query),
            LookupError::Internal(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body sent to the client. Internal details are never included.
    fn body(&self) -> ErrorResponse {
        match self {
            AppError::BadRequest(query) => ErrorResponse::new(query.code(), query.to_string()),
            AppError::NotFound => ErrorResponse::new("404", "Not Found"),
            AppError::MethodNotAllowed => ErrorResponse::new("405", "Method Not Allowed"),
            AppError::Internal { .. } => ErrorResponse::new("500", "Internal Server Error."),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Internal { message } => error!(%status, "{message}"),
            _ => debug!(%status, error = ?self, "request rejected"),
        }

        (status, Json(self.body())).into_response()
    }
}
