use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::GameEvent, service::EventService, types::RecordEventRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for recording a live event
///
/// POST /events
/// Returns 201 with the stored event
#[instrument(name = "record_event", skip(state, request))]
pub async fn record_event(
    State(state): State<AppState>,
    Json(request): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<GameEvent>), AppError> {
    let service = EventService::new(Arc::clone(&state.event_store));
    let event = service.record_event(request, Utc::now()).await?;

    info!(event_id = %event.id, "Live event recorded");
    Ok((StatusCode::CREATED, Json(event)))
}

/// HTTP handler for retracting a recorded event
///
/// DELETE /events/:event_id
#[instrument(name = "delete_event", skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = EventService::new(Arc::clone(&state.event_store));
    service.delete_event(&event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
