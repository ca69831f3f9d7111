//! REST API endpoints.
//!
//! Axum-based HTTP API for league standings, fixture generation, tie
//! scoring and playoff brackets.

pub mod identity;
pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::EngineError;
use crate::storage::StorageError;
use state::AppState;

/// API error types. Validation and authorization failures are detected
/// before any mutation and carry the specific reason.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient capacity: {0}")]
    Capacity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Authorization(_) => (StatusCode::FORBIDDEN, "AUTHORIZATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Capacity(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CAPACITY_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NoTeams | EngineError::InsufficientScheduleDates { .. } => {
                ApiError::Capacity(err.to_string())
            }
            EngineError::InsufficientStandings { .. } => ApiError::Capacity(err.to_string()),
            EngineError::FixturesExist | EngineError::PlayoffsExist => {
                ApiError::Conflict(err.to_string())
            }
            EngineError::Validation(msg) => ApiError::Validation(msg),
            EngineError::NotFound(msg) => ApiError::NotFound(msg),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/leagues", get(routes::leagues::list_leagues))
        .route("/api/leagues/:id", get(routes::leagues::get_league))
        .route(
            "/api/leagues/:id/standings",
            get(routes::standings::get_standings),
        )
        .route("/api/leagues/:id/ties", get(routes::ties::list_ties))
        .route(
            "/api/leagues/:id/ties/generate",
            post(routes::ties::generate_ties),
        )
        .route(
            "/api/leagues/:league_id/ties/:tie_id",
            put(routes::ties::update_tie),
        )
        .route(
            "/api/leagues/:league_id/ties/:tie_id/rubbers/:rubber_index/score",
            put(routes::ties::update_rubber_score),
        )
        .route(
            "/api/leagues/:league_id/ties/:tie_id/walkover",
            post(routes::ties::record_walkover),
        )
        .route(
            "/api/leagues/:id/playoffs/generate",
            post(routes::playoffs::generate_playoffs),
        )
        .route("/api/leagues/:id/playoffs", get(routes::playoffs::list_playoffs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
