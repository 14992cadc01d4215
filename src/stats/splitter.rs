use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::events::GameEvent;

use super::models::GameStatLine;
use super::rollup::percentage;

/// Separates team events from opponent events
pub fn split_by_side<'a, I>(events: I) -> (Vec<&'a GameEvent>, Vec<&'a GameEvent>)
where
    I: IntoIterator<Item = &'a GameEvent>,
{
    events
        .into_iter()
        .partition(|event| !event.is_opponent_event)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

impl GameResult {
    pub fn from_points(team_points: u32, opponent_points: u32) -> Self {
        if team_points > opponent_points {
            GameResult::Win
        } else if opponent_points > team_points {
            GameResult::Loss
        } else {
            GameResult::Tie
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub game_id: String,
    pub game_name: String,
    pub start_time: DateTime<Utc>,
    pub team_points: u32,
    pub opponent_points: u32,
    pub result: GameResult,
}

/// One outcome per game seen on either side, in start-time order.
///
/// A game with events on only one side scores zero for the other.
pub fn game_outcomes(
    team: &BTreeMap<String, GameStatLine>,
    opponent: &BTreeMap<String, GameStatLine>,
) -> Vec<GameOutcome> {
    let game_ids: BTreeSet<&String> = team.keys().chain(opponent.keys()).collect();

    let mut outcomes: Vec<GameOutcome> = game_ids
        .into_iter()
        .filter_map(|game_id| {
            let team_line = team.get(game_id);
            let opponent_line = opponent.get(game_id);
            let label = team_line.or(opponent_line)?;

            let team_points = team_line.map_or(0, |l| l.counters.points);
            let opponent_points = opponent_line.map_or(0, |l| l.counters.points);
            let start_time = match (team_line, opponent_line) {
                (Some(t), Some(o)) => t.start_time.min(o.start_time),
                _ => label.start_time,
            };

            Some(GameOutcome {
                game_id: game_id.clone(),
                game_name: label.game_name.clone(),
                start_time,
                team_points,
                opponent_points,
                result: GameResult::from_points(team_points, opponent_points),
            })
        })
        .collect();

    outcomes.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.game_id.cmp(&b.game_id))
    });
    outcomes
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_percentage: u32,
}

impl WinLossRecord {
    pub fn from_outcomes(outcomes: &[GameOutcome]) -> Self {
        let wins = count(outcomes, GameResult::Win);
        let losses = count(outcomes, GameResult::Loss);
        let ties = count(outcomes, GameResult::Tie);

        Self {
            wins,
            losses,
            ties,
            win_percentage: percentage(wins, outcomes.len() as u32),
        }
    }
}

fn count(outcomes: &[GameOutcome], result: GameResult) -> u32 {
    outcomes.iter().filter(|o| o.result == result).count() as u32
}
