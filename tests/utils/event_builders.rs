//! Fluent builders for `POST /events` payloads
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::{json, Value};

// ============================================================================
// Event Payload Builder
// ============================================================================

pub struct EventBuilder {
    body: Value,
}

impl EventBuilder {
    /// An event credited to one of our players
    pub fn team(player_id: &str, event_type: &str) -> Self {
        Self {
            body: json!({
                "player_id": player_id,
                "event_type": event_type,
                "quarter": 1,
            }),
        }
    }

    /// An event by the opposing side, keyed by jersey
    pub fn opponent(jersey: &str, event_type: &str) -> Self {
        Self {
            body: json!({
                "event_type": event_type,
                "quarter": 1,
                "is_opponent_event": true,
                "opponent_jersey": jersey,
            }),
        }
    }

    pub fn game(self, game_id: &str) -> Self {
        self.set("game_id", json!(game_id))
    }

    pub fn session(self, session_id: &str) -> Self {
        self.set("session_id", json!(session_id))
    }

    pub fn quarter(self, quarter: u8) -> Self {
        self.set("quarter", json!(quarter))
    }

    pub fn value(self, points: u32) -> Self {
        self.set("event_value", json!(points))
    }

    pub fn metadata(self, metadata: Value) -> Self {
        self.set("metadata", metadata)
    }

    pub fn build(self) -> Value {
        self.body
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.body[key] = value;
        self
    }
}
