pub mod aggregator;
pub mod classifier;
pub mod rollup;
pub mod splitter;
pub mod trend;

mod errors;
mod handlers;
pub mod models;
pub mod service;
pub mod types;

pub use classifier::classify;
pub use errors::StatsError;
pub use handlers::{player_stats, players_stats, session_box_score, team_stats};
pub use models::*;
pub use service::StatsService;
pub use trend::{Trend, TrendSignal, TrendStrategy};
pub use types::{BoxScoreLine, PlayerListEntry, PlayerSummary, SessionBoxScore, TeamSummary};
