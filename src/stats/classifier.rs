use crate::events::{EventType, GameEvent};

use super::models::StatCounters;

/// Maps one event to the counters it moves.
///
/// Total over every event type: unrecognised types yield an all-zero delta.
/// A three is also a field goal, so `three_*` events bump both families.
/// On made shots a stored `event_value` replaces the default point value.
pub fn classify(event: &GameEvent) -> StatCounters {
    let mut delta = StatCounters::default();

    match event.event_type {
        EventType::FgMade => {
            delta.points = 2;
            delta.fg_made = 1;
            delta.fg_attempted = 1;
        }
        EventType::FgMissed => {
            delta.fg_attempted = 1;
        }
        EventType::ThreeMade => {
            delta.points = 3;
            delta.three_made = 1;
            delta.three_attempted = 1;
            delta.fg_made = 1;
            delta.fg_attempted = 1;
        }
        EventType::ThreeMissed => {
            delta.three_attempted = 1;
            delta.fg_attempted = 1;
        }
        EventType::FtMade => {
            delta.points = 1;
            delta.ft_made = 1;
            delta.ft_attempted = 1;
        }
        EventType::FtMissed => {
            delta.ft_attempted = 1;
        }
        EventType::Rebound => delta.rebounds = 1,
        EventType::Assist => delta.assists = 1,
        EventType::Steal => delta.steals = 1,
        EventType::Block => delta.blocks = 1,
        EventType::Turnover => delta.turnovers = 1,
        EventType::Foul => delta.fouls = 1,
        EventType::Unknown => {}
    }

    if event.event_type.is_made_shot() {
        if let Some(value) = event.event_value {
            delta.points = value;
        }
    }

    delta
}
