use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::filter::EventQuery;
use super::models::{EventMetadata, EventType, GameEvent, GameMetadata};
use crate::stats::StatsError;

/// Read/write access to recorded game events and the games they belong to
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events matching `query`, ordered by `created_at` ascending
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<GameEvent>, StatsError>;
    async fn query_games_metadata(
        &self,
        game_ids: &[String],
    ) -> Result<Vec<GameMetadata>, StatsError>;
    async fn insert_event(&self, event: &GameEvent) -> Result<(), StatsError>;
    /// Returns false when no event had this id
    async fn delete_event(&self, event_id: &str) -> Result<bool, StatsError>;
}

/// In-memory implementation of EventStore for development and testing
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<GameEvent>>>,
    games: Arc<RwLock<HashMap<String, GameMetadata>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with games and events
    pub fn with_data(games: Vec<GameMetadata>, events: Vec<GameEvent>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
            games: Arc::new(RwLock::new(
                games.into_iter().map(|g| (g.id.clone(), g)).collect(),
            )),
        }
    }

    pub async fn add_game(&self, game: GameMetadata) {
        self.games.write().await.insert(game.id.clone(), game);
    }

    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }
}

fn matches_query(event: &GameEvent, query: &EventQuery) -> bool {
    if let Some(player_id) = &query.player_id {
        if event.player_id.as_ref() != Some(player_id) {
            return false;
        }
    }
    if let Some(session_id) = &query.session_id {
        if event.session_id.as_ref() != Some(session_id) {
            return false;
        }
    }
    if query.start.is_some_and(|start| event.created_at < start) {
        return false;
    }
    if query.end.is_some_and(|end| event.created_at > end) {
        return false;
    }
    if let Some(game_ids) = &query.game_ids {
        match &event.game_id {
            Some(game_id) if game_ids.contains(game_id) => {}
            _ => return false,
        }
    }
    true
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    #[instrument(skip(self))]
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<GameEvent>, StatsError> {
        let events = self.events.read().await;
        let mut matched: Vec<GameEvent> = events
            .iter()
            .filter(|event| matches_query(event, query))
            .cloned()
            .collect();
        matched.sort_by_key(|event| event.created_at);

        debug!(matched = matched.len(), "Queried events from memory");
        Ok(matched)
    }

    #[instrument(skip(self))]
    async fn query_games_metadata(
        &self,
        game_ids: &[String],
    ) -> Result<Vec<GameMetadata>, StatsError> {
        let games = self.games.read().await;
        Ok(game_ids
            .iter()
            .filter_map(|id| games.get(id).cloned())
            .collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert_event(&self, event: &GameEvent) -> Result<(), StatsError> {
        let mut events = self.events.write().await;
        if events.iter().any(|existing| existing.id == event.id) {
            warn!("Event already exists in memory");
            return Err(StatsError::Repository("Event already exists".to_string()));
        }
        events.push(event.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, event_id: &str) -> Result<bool, StatsError> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|event| event.id != event_id);
        Ok(events.len() < before)
    }
}

/// PostgreSQL implementation of EventStore
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn event_from_row(row: &PgRow) -> Result<GameEvent, sqlx::Error> {
    let event_type: String = row.try_get("event_type")?;
    let event_value: Option<i32> = row.try_get("event_value")?;
    let quarter: i32 = row.try_get("quarter")?;
    let metadata: Option<serde_json::Value> = row.try_get("metadata")?;

    Ok(GameEvent {
        id: row.try_get("id")?,
        game_id: row.try_get("game_id")?,
        session_id: row.try_get("session_id")?,
        player_id: row.try_get("player_id")?,
        event_type: EventType::parse_lossy(&event_type),
        event_value: decode_event_value(event_value)?,
        quarter: u8::try_from(quarter).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        is_opponent_event: row.try_get("is_opponent_event")?,
        opponent_jersey: row.try_get("opponent_jersey")?,
        game_time: row.try_get("game_time")?,
        // Legacy rows carry free-form metadata; it is display-only, so unreadable shapes drop to None
        metadata: metadata
            .and_then(|value| serde_json::from_value::<EventMetadata>(value).ok())
            .unwrap_or_default(),
        created_at: row.try_get("created_at")?,
    })
}

/// Stored point values must come back exactly; a negative or oversized column is a decode error
fn decode_event_value(value: Option<i32>) -> Result<Option<u32>, sqlx::Error> {
    value
        .map(u32::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn encode_event_value(value: Option<u32>) -> Result<Option<i32>, StatsError> {
    value.map(i32::try_from).transpose().map_err(|e| {
        warn!(error = %e, "Event value does not fit the event_value column");
        StatsError::Repository(format!("event_value out of range: {e}"))
    })
}

fn repository_error(e: sqlx::Error) -> StatsError {
    warn!(error = %e, "Event store query failed");
    StatsError::Repository(e.to_string())
}

#[async_trait]
impl EventStore for PostgresEventStore {
    #[instrument(skip(self))]
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<GameEvent>, StatsError> {
        let rows = sqlx::query(
            "SELECT id, game_id, session_id, player_id, event_type, event_value, quarter, \
                    is_opponent_event, opponent_jersey, game_time, metadata, created_at \
             FROM game_events \
             WHERE ($1::text IS NULL OR player_id = $1) \
               AND ($2::text IS NULL OR session_id = $2) \
               AND ($3::timestamptz IS NULL OR created_at >= $3) \
               AND ($4::timestamptz IS NULL OR created_at <= $4) \
               AND ($5::text[] IS NULL OR game_id = ANY($5)) \
             ORDER BY created_at ASC",
        )
        .bind(&query.player_id)
        .bind(&query.session_id)
        .bind(query.start)
        .bind(query.end)
        .bind(&query.game_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        let events = rows
            .iter()
            .map(event_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(repository_error)?;

        debug!(matched = events.len(), "Queried events from database");
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn query_games_metadata(
        &self,
        game_ids: &[String],
    ) -> Result<Vec<GameMetadata>, StatsError> {
        let rows = sqlx::query("SELECT id, name, start_time FROM games WHERE id = ANY($1)")
            .bind(game_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        rows.iter()
            .map(|row| -> Result<GameMetadata, sqlx::Error> {
                Ok(GameMetadata {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    start_time: row.try_get("start_time")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(repository_error)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert_event(&self, event: &GameEvent) -> Result<(), StatsError> {
        let event_value = encode_event_value(event.event_value)?;

        sqlx::query(
            "INSERT INTO game_events (id, game_id, session_id, player_id, event_type, event_value, \
                                      quarter, is_opponent_event, opponent_jersey, game_time, \
                                      metadata, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(&event.id)
        .bind(&event.game_id)
        .bind(&event.session_id)
        .bind(&event.player_id)
        .bind(event.event_type.as_ref())
        .bind(event_value)
        .bind(i32::from(event.quarter))
        .bind(event.is_opponent_event)
        .bind(&event.opponent_jersey)
        .bind(&event.game_time)
        .bind(sqlx::types::Json(&event.metadata))
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(repository_error)?;

        debug!("Event stored in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, event_id: &str) -> Result<bool, StatsError> {
        let result = sqlx::query("DELETE FROM game_events WHERE id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(result.rows_affected() > 0)
    }
}
