// Public API - what other modules can use
pub use filter::{EventQuery, RangeParams, TimeRange};
pub use handlers::{delete_event, record_event};
pub use models::{EventMetadata, EventType, GameEvent, GameMetadata};
pub use repository::{EventStore, InMemoryEventStore, PostgresEventStore};
pub use service::EventService;
pub use types::RecordEventRequest;

// Internal modules
pub mod filter;
mod handlers;
pub mod models;
pub mod repository;
mod service;
mod types;
