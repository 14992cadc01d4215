// Library crate for the courtstats server
// Exposes the public API for integration tests

pub mod config;
pub mod events;
pub mod roster;
pub mod routes;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::{SeasonCalendar, ServerConfig, StatsConfig};
pub use events::{EventStore, GameEvent, GameMetadata, InMemoryEventStore, TimeRange};
pub use roster::{InMemoryRosterRepository, PlayerProfile, RosterRepository};
pub use routes::router;
pub use shared::{AppError, AppState};
pub use stats::{StatsError, StatsService};
