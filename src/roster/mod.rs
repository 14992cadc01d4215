pub mod models;
pub mod repository;

pub use models::PlayerProfile;
pub use repository::{InMemoryRosterRepository, PostgresRosterRepository, RosterRepository};
