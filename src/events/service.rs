use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::{EventType, GameEvent, MAX_EVENT_VALUE},
    repository::EventStore,
    types::RecordEventRequest,
};
use crate::stats::StatsError;

/// Records and retracts live-tracked events
pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Validates the request, stamps id and creation time, and stores the event
    #[instrument(skip(self, request), fields(event_type = ?request.event_type))]
    pub async fn record_event(
        &self,
        request: RecordEventRequest,
        now: DateTime<Utc>,
    ) -> Result<GameEvent, StatsError> {
        validate(&request)?;

        let event = GameEvent {
            id: Uuid::new_v4().to_string(),
            game_id: request.game_id,
            session_id: request.session_id,
            player_id: request.player_id,
            event_type: request.event_type,
            event_value: request.event_value,
            quarter: request.quarter,
            is_opponent_event: request.is_opponent_event,
            opponent_jersey: request.opponent_jersey,
            game_time: request.game_time,
            metadata: request.metadata,
            created_at: now,
        };

        self.store.insert_event(&event).await?;

        info!(
            event_id = %event.id,
            game_id = ?event.game_id,
            opponent = event.is_opponent_event,
            "Event recorded"
        );
        Ok(event)
    }

    /// Removes a mis-recorded event
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: &str) -> Result<(), StatsError> {
        if !self.store.delete_event(event_id).await? {
            debug!("Event not found for deletion");
            return Err(StatsError::NotFound(format!("Event {event_id} not found")));
        }
        info!("Event deleted");
        Ok(())
    }
}

fn validate(request: &RecordEventRequest) -> Result<(), StatsError> {
    if request.event_type == EventType::Unknown {
        return Err(StatsError::Validation("Unsupported event type".to_string()));
    }
    if request.event_value.is_some_and(|value| value > MAX_EVENT_VALUE) {
        return Err(StatsError::Validation(format!(
            "event_value must be between 0 and {MAX_EVENT_VALUE}"
        )));
    }
    if request.quarter == 0 {
        return Err(StatsError::Validation("Quarter must be at least 1".to_string()));
    }
    match (request.is_opponent_event, &request.player_id) {
        (false, None) => {
            return Err(StatsError::Validation(
                "Team events require a player_id".to_string(),
            ))
        }
        (true, Some(_)) => {
            return Err(StatsError::Validation(
                "Opponent events must not carry a player_id".to_string(),
            ))
        }
        _ => {}
    }
    if !request.metadata.fits(request.event_type) {
        return Err(StatsError::Validation(format!(
            "Metadata does not apply to {} events",
            request.event_type.as_ref()
        )));
    }
    Ok(())
}
