use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::StatsService,
    types::{PlayerListEntry, PlayerSummary, SessionBoxScore, TeamSummary},
};
use crate::events::{RangeParams, TimeRange};
use crate::shared::{AppError, AppState};

fn stats_service(state: &AppState) -> StatsService {
    StatsService::new(
        Arc::clone(&state.event_store),
        Arc::clone(&state.roster_repository),
        Arc::clone(&state.stats_config),
    )
}

/// HTTP handler for one player's stats over a time range
///
/// GET /players/:player_id/stats?range=season
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<Json<PlayerSummary>, AppError> {
    let range = TimeRange::try_from(params)?;
    let summary = stats_service(&state)
        .player_summary(&player_id, &range, Utc::now())
        .await?;

    Ok(Json(summary))
}

/// HTTP handler for the roster stats table
///
/// GET /players/stats
#[instrument(name = "players_stats", skip(state))]
pub async fn players_stats(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<PlayerListEntry>>, AppError> {
    let range = TimeRange::try_from(params)?;
    let entries = stats_service(&state)
        .players_summary(&range, Utc::now())
        .await?;

    Ok(Json(entries))
}

/// HTTP handler for team vs opponent totals
///
/// GET /team/stats
#[instrument(name = "team_stats", skip(state))]
pub async fn team_stats(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<TeamSummary>, AppError> {
    let range = TimeRange::try_from(params)?;
    let summary = stats_service(&state)
        .team_summary(&range, Utc::now())
        .await?;

    Ok(Json(summary))
}

/// HTTP handler for a live session's running box score
///
/// GET /sessions/:session_id/box-score
#[instrument(name = "session_box_score", skip(state))]
pub async fn session_box_score(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionBoxScore>, AppError> {
    let box_score = stats_service(&state).session_box_score(&session_id).await?;

    info!(
        session_id = %box_score.session_id,
        events = box_score.event_count,
        "Box score served"
    );
    Ok(Json(box_score))
}
