use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{events, shared::AppState, stats};

/// Builds the full HTTP surface over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/events", post(events::record_event))
        .route("/events/:event_id", delete(events::delete_event))
        .route("/players/stats", get(stats::players_stats))
        .route("/players/:player_id/stats", get(stats::player_stats))
        .route("/team/stats", get(stats::team_stats))
        .route(
            "/sessions/:session_id/box-score",
            get(stats::session_box_score),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
