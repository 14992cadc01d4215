use serde::{Deserialize, Serialize};

use super::models::{
    AggregateStatSummary, GameStatLine, ShootingPercentages, StatAverages, StatCounters,
};
use super::splitter::GameOutcome;
use super::trend::Trend;
use crate::roster::PlayerProfile;

/// Response for a single player's stats page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerProfile,
    #[serde(flatten)]
    pub summary: AggregateStatSummary,
    /// Most recent games, newest first
    pub recent: Vec<GameStatLine>,
    /// Every game in scope, oldest first
    pub game_stats: Vec<GameStatLine>,
}

/// One row of the players table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerListEntry {
    pub id: String,
    pub name: String,
    pub position: Option<String>,
    pub number: Option<String>,
    pub games: u32,
    pub totals: StatCounters,
    pub averages: StatAverages,
    pub percentages: ShootingPercentages,
    pub trend: Trend,
    pub change_pct: f64,
    /// Points per game for the latest games, oldest first
    pub recent_points: Vec<u32>,
}

/// Response for the team-vs-opponent dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_percentage: u32,
    pub ppg: f64,
    pub oppg: f64,
    pub team: AggregateStatSummary,
    pub opponent: AggregateStatSummary,
    pub games: Vec<GameOutcome>,
}

/// Flat counters for one subject in a live session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScoreLine {
    /// Player id for team lines, jersey for opponent lines
    pub subject: String,
    pub name: Option<String>,
    #[serde(flatten)]
    pub counters: StatCounters,
    pub percentages: ShootingPercentages,
}

/// Running box score of one tracking session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBoxScore {
    pub session_id: String,
    pub event_count: usize,
    pub team: StatCounters,
    pub team_percentages: ShootingPercentages,
    pub opponent: StatCounters,
    pub opponent_percentages: ShootingPercentages,
    pub players: Vec<BoxScoreLine>,
    pub opponents: Vec<BoxScoreLine>,
}
