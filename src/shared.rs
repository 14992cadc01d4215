use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::StatsConfig;
use crate::events::repository::EventStore;
use crate::roster::repository::RosterRepository;
use crate::stats::StatsError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub event_store: Arc<dyn EventStore>,
    pub roster_repository: Arc<dyn RosterRepository>,
    pub stats_config: Arc<StatsConfig>,
}

impl AppState {
    pub fn new(
        event_store: Arc<dyn EventStore>,
        roster_repository: Arc<dyn RosterRepository>,
        stats_config: StatsConfig,
    ) -> Self {
        Self {
            event_store,
            roster_repository,
            stats_config: Arc::new(stats_config),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    #[allow(dead_code)] // Reserved for failures with no user-facing detail
    Internal,
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Repository(msg) => AppError::DatabaseError(msg),
            StatsError::Validation(msg) => AppError::BadRequest(msg),
            StatsError::NotFound(msg) => AppError::NotFound(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
