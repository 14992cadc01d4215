use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use crate::config::SeasonCalendar;
use crate::stats::StatsError;

/// Scope of a stats request
#[derive(Debug, Clone, PartialEq)]
pub enum TimeRange {
    /// From the season's opening date through now; `None` means the current season
    Season { label: Option<String> },
    Last30Days,
    Week,
    Month,
    /// Whole days, both ends inclusive
    Custom { start: NaiveDate, end: NaiveDate },
    /// Explicit games; time bounds are ignored
    SelectGames { game_ids: Vec<String> },
}

impl TimeRange {
    pub fn is_game_selection(&self) -> bool {
        matches!(self, TimeRange::SelectGames { .. })
    }
}

/// Raw query-string form of a [`TimeRange`]
///
/// `?range=custom&start=2024-11-01&end=2024-11-30`, `?game_ids=g1,g2`, ...
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub range: Option<String>,
    pub season: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub game_ids: Option<String>,
}

impl TryFrom<RangeParams> for TimeRange {
    type Error = StatsError;

    fn try_from(params: RangeParams) -> Result<Self, Self::Error> {
        let game_ids: Vec<String> = params
            .game_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        let range = match params.range.as_deref() {
            Some(range) => range.to_string(),
            None if !game_ids.is_empty() => "select_games".to_string(),
            None => "season".to_string(),
        };

        match range.as_str() {
            "season" => Ok(TimeRange::Season {
                label: params.season,
            }),
            "last30days" => Ok(TimeRange::Last30Days),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "custom" => match (params.start, params.end) {
                (Some(start), Some(end)) if start <= end => Ok(TimeRange::Custom { start, end }),
                (Some(_), Some(_)) => Err(StatsError::Validation(
                    "Custom range start must not be after end".to_string(),
                )),
                _ => Err(StatsError::Validation(
                    "Custom range requires start and end dates".to_string(),
                )),
            },
            "select_games" | "selectGames" => {
                if game_ids.is_empty() {
                    Err(StatsError::Validation(
                        "Game selection requires at least one game id".to_string(),
                    ))
                } else {
                    Ok(TimeRange::SelectGames { game_ids })
                }
            }
            other => Err(StatsError::Validation(format!("Unknown range: {other}"))),
        }
    }
}

/// Filter handed to the event store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub player_id: Option<String>,
    pub session_id: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub game_ids: Option<Vec<String>>,
}

impl EventQuery {
    /// Resolves a range against the season calendar and the caller-supplied `now`
    pub fn for_range(
        range: &TimeRange,
        calendar: &SeasonCalendar,
        now: DateTime<Utc>,
    ) -> Result<Self, StatsError> {
        let query = match range {
            TimeRange::Season { label } => {
                let label = label
                    .clone()
                    .unwrap_or_else(|| calendar.current_label(now));
                Self::between(calendar.season_start(&label)?, now)
            }
            TimeRange::Last30Days => Self::between(now - Duration::days(30), now),
            TimeRange::Week => Self::between(now - Duration::days(7), now),
            TimeRange::Month => {
                let start = now
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(now - Duration::days(30));
                Self::between(start, now)
            }
            TimeRange::Custom { start, end } => {
                let start = start
                    .and_hms_opt(0, 0, 0)
                    .map(|dt| Utc.from_utc_datetime(&dt));
                let end = end
                    .and_hms_milli_opt(23, 59, 59, 999)
                    .map(|dt| Utc.from_utc_datetime(&dt));
                Self {
                    start,
                    end,
                    ..Self::default()
                }
            }
            TimeRange::SelectGames { game_ids } => Self {
                game_ids: Some(game_ids.clone()),
                ..Self::default()
            },
        };
        Ok(query)
    }

    /// Every event recorded during one tracking session
    pub fn for_session(session_id: &str) -> Self {
        Self {
            session_id: Some(session_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_player(mut self, player_id: &str) -> Self {
        self.player_id = Some(player_id.to_string());
        self
    }

    fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }
}
