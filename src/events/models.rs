use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Kind of in-game occurrence recorded by the live tracker.
///
/// Stored as its snake_case name. Anything the server does not recognise
/// reads back as `Unknown` so older builds keep working when new kinds are
/// introduced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum EventType {
    FgMade,
    FgMissed,
    ThreeMade,
    ThreeMissed,
    FtMade,
    FtMissed,
    Rebound,
    Assist,
    Steal,
    Block,
    Turnover,
    Foul,
    Unknown,
}

/// Largest point value a recorded shot may carry
pub const MAX_EVENT_VALUE: u32 = 3;

impl EventType {
    /// Parses a stored name, mapping unrecognised names to `Unknown`
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or(EventType::Unknown)
    }

    /// Made field goals, threes and free throws
    pub fn is_made_shot(&self) -> bool {
        matches!(
            self,
            EventType::FgMade | EventType::ThreeMade | EventType::FtMade
        )
    }

    pub fn is_shot(&self) -> bool {
        matches!(
            self,
            EventType::FgMade
                | EventType::FgMissed
                | EventType::ThreeMade
                | EventType::ThreeMissed
                | EventType::FtMade
                | EventType::FtMissed
        )
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        EventType::parse_lossy(&value)
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_ref().to_string()
    }
}

/// Display-only details attached to an event.
///
/// Each variant may only accompany the event types listed in [`EventMetadata::fits`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventMetadata {
    #[default]
    None,
    Shot {
        assisted_by: Option<String>,
        shot_zone: Option<String>,
    },
    Rebound {
        #[serde(default)]
        offensive: bool,
    },
    Assist {
        scorer_id: Option<String>,
    },
    Steal {
        turnover_by: Option<String>,
    },
    Block {
        shooter_id: Option<String>,
    },
    Turnover {
        stolen_by: Option<String>,
    },
    Foul {
        fouled_player: Option<String>,
        #[serde(default)]
        shooting: bool,
    },
}

impl EventMetadata {
    /// Whether this metadata shape is valid for the given event type
    pub fn fits(&self, event_type: EventType) -> bool {
        match self {
            EventMetadata::None => true,
            EventMetadata::Shot { .. } => event_type.is_shot(),
            EventMetadata::Rebound { .. } => event_type == EventType::Rebound,
            EventMetadata::Assist { .. } => event_type == EventType::Assist,
            EventMetadata::Steal { .. } => event_type == EventType::Steal,
            EventMetadata::Block { .. } => event_type == EventType::Block,
            EventMetadata::Turnover { .. } => event_type == EventType::Turnover,
            EventMetadata::Foul { .. } => event_type == EventType::Foul,
        }
    }
}

/// One recorded in-game occurrence (`game_events` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: String,
    pub game_id: Option<String>, // Absent on legacy events recorded before game linking
    pub session_id: Option<String>,
    pub player_id: Option<String>, // None for opponent events
    pub event_type: EventType,
    pub event_value: Option<u32>, // Point override for made shots
    pub quarter: u8,
    pub is_opponent_event: bool,
    pub opponent_jersey: Option<String>,
    pub game_time: Option<String>, // In-game clock, e.g. "07:42"
    #[serde(default)]
    pub metadata: EventMetadata,
    pub created_at: DateTime<Utc>,
}

/// Minimal game record used to label and filter per-game lines (`games` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub id: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
}

impl GameMetadata {
    /// Case-insensitive substring match of the game name against `pattern`
    pub fn is_scrimmage(&self, pattern: &str) -> bool {
        !pattern.is_empty() && self.name.to_lowercase().contains(&pattern.to_lowercase())
    }
}
