use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::PlayerProfile;
use crate::stats::StatsError;

/// Trait for looking up team roster entries
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerProfile>, StatsError>;
    /// All players, ordered by name
    async fn list_players(&self) -> Result<Vec<PlayerProfile>, StatsError>;
}

/// In-memory implementation of RosterRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryRosterRepository {
    players: RwLock<HashMap<String, PlayerProfile>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory roster with pre-populated players
    pub fn with_players(players: Vec<PlayerProfile>) -> Self {
        Self {
            players: RwLock::new(players.into_iter().map(|p| (p.id.clone(), p)).collect()),
        }
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerProfile>, StatsError> {
        let players = self.players.read().await;
        let player = players.get(player_id).cloned();
        if player.is_none() {
            debug!("Player not found in memory");
        }
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerProfile>, StatsError> {
        let players = self.players.read().await;
        let mut list: Vec<PlayerProfile> = players.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }
}

/// PostgreSQL implementation of RosterRepository
pub struct PostgresRosterRepository {
    pool: PgPool,
}

impl PostgresRosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerProfile>, StatsError> {
        sqlx::query_as::<_, PlayerProfile>(
            "SELECT id, name, position, number FROM players WHERE id = $1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch player from database");
            StatsError::Repository(e.to_string())
        })
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerProfile>, StatsError> {
        sqlx::query_as::<_, PlayerProfile>(
            "SELECT id, name, position, number FROM players ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list players from database");
            StatsError::Repository(e.to_string())
        })
    }
}
