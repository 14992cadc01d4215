use serde::{Deserialize, Serialize};

use super::models::{EventMetadata, EventType};

/// Request payload for recording one live event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEventRequest {
    pub game_id: Option<String>,
    pub session_id: Option<String>,
    pub player_id: Option<String>,
    pub event_type: EventType,
    pub event_value: Option<u32>,
    pub quarter: u8,
    #[serde(default)]
    pub is_opponent_event: bool,
    pub opponent_jersey: Option<String>,
    pub game_time: Option<String>,
    #[serde(default)]
    pub metadata: EventMetadata,
}
