use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::AddAssign;

use super::trend::TrendSignal;

/// Box-score counters.
///
/// The classifier returns one of these as the delta for a single event;
/// aggregation sums them into per-game lines and range totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounters {
    pub points: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
}

impl StatCounters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for StatCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.points = self.points.saturating_add(rhs.points);
        self.fg_made = self.fg_made.saturating_add(rhs.fg_made);
        self.fg_attempted = self.fg_attempted.saturating_add(rhs.fg_attempted);
        self.three_made = self.three_made.saturating_add(rhs.three_made);
        self.three_attempted = self.three_attempted.saturating_add(rhs.three_attempted);
        self.ft_made = self.ft_made.saturating_add(rhs.ft_made);
        self.ft_attempted = self.ft_attempted.saturating_add(rhs.ft_attempted);
        self.rebounds = self.rebounds.saturating_add(rhs.rebounds);
        self.assists = self.assists.saturating_add(rhs.assists);
        self.steals = self.steals.saturating_add(rhs.steals);
        self.blocks = self.blocks.saturating_add(rhs.blocks);
        self.turnovers = self.turnovers.saturating_add(rhs.turnovers);
        self.fouls = self.fouls.saturating_add(rhs.fouls);
    }
}

impl Sum for StatCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, next| {
            acc += next;
            acc
        })
    }
}

impl<'a> Sum<&'a StatCounters> for StatCounters {
    fn sum<I: Iterator<Item = &'a StatCounters>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One subject's counters for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatLine {
    pub game_id: String,
    pub game_name: String,
    pub start_time: DateTime<Utc>,
    #[serde(flatten)]
    pub counters: StatCounters,
}

/// Per-game averages, rounded to one decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatAverages {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub fouls: f64,
    pub fg_made: f64,
    pub three_made: f64,
    pub ft_made: f64,
}

/// Whole-number shooting percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootingPercentages {
    pub fg_pct: u32,
    pub three_pct: u32,
    pub ft_pct: u32,
}

/// Range totals, averages, percentages and trend for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatSummary {
    pub games: u32,
    pub totals: StatCounters,
    pub averages: StatAverages,
    pub percentages: ShootingPercentages,
    pub trend: TrendSignal,
}
