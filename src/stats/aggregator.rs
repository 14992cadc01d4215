use std::collections::{BTreeMap, HashMap};

use crate::events::{GameEvent, GameMetadata};

use super::classifier::classify;
use super::models::{GameStatLine, StatCounters};

pub const UNKNOWN_GAME_NAME: &str = "Unknown game";

/// Folds events into one line per game id.
///
/// Events without a game id cannot be attributed to a game and are left out.
/// Name and start time come from `games`; games missing there get a
/// placeholder name and the earliest event time.
pub fn aggregate_by_game<'a, I>(
    events: I,
    games: &HashMap<String, GameMetadata>,
) -> BTreeMap<String, GameStatLine>
where
    I: IntoIterator<Item = &'a GameEvent>,
{
    let mut partitions: BTreeMap<&'a str, Vec<&'a GameEvent>> = BTreeMap::new();
    for event in events {
        if let Some(game_id) = event.game_id.as_deref() {
            partitions.entry(game_id).or_default().push(event);
        }
    }

    partitions
        .into_iter()
        .filter_map(|(game_id, partition)| {
            let (game_name, start_time) = match games.get(game_id) {
                Some(game) => (game.name.clone(), game.start_time),
                None => (
                    UNKNOWN_GAME_NAME.to_string(),
                    partition.iter().map(|e| e.created_at).min()?,
                ),
            };
            let counters: StatCounters = partition.iter().map(|event| classify(event)).sum();

            Some((
                game_id.to_string(),
                GameStatLine {
                    game_id: game_id.to_string(),
                    game_name,
                    start_time,
                    counters,
                },
            ))
        })
        .collect()
}

/// Ungrouped fold over every event, including ones without a game id
pub fn flat_totals<'a, I>(events: I) -> StatCounters
where
    I: IntoIterator<Item = &'a GameEvent>,
{
    events.into_iter().map(classify).sum()
}

/// Lines ordered by game start, ties broken by game id
pub fn chronological<I>(lines: I) -> Vec<GameStatLine>
where
    I: IntoIterator<Item = GameStatLine>,
{
    let mut lines: Vec<GameStatLine> = lines.into_iter().collect();
    lines.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.game_id.cmp(&b.game_id))
    });
    lines
}
