use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};

use crate::stats::{StatsError, TrendStrategy};

/// Maps season labels such as `2024-25` to the date the season opens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonCalendar {
    pub start_month: u32,
    pub start_day: u32,
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self {
            start_month: 8,
            start_day: 1,
        }
    }
}

impl SeasonCalendar {
    /// Calendar opening on `month`/`day`, or `None` when that date does not exist every year
    pub fn checked(start_month: u32, start_day: u32) -> Option<Self> {
        // 2001 is not a leap year, so Feb 29 is rejected
        NaiveDate::from_ymd_opt(2001, start_month, start_day)?;
        Some(Self {
            start_month,
            start_day,
        })
    }

    /// Start of the season named by `label` (`2024-25`, `2024-2025` or `2024`)
    pub fn season_start(&self, label: &str) -> Result<DateTime<Utc>, StatsError> {
        let year_part = label.trim().split('-').next().unwrap_or_default();
        let year: i32 = year_part
            .parse()
            .map_err(|_| StatsError::Validation(format!("Invalid season label: {label}")))?;
        self.start_of(year)
            .ok_or_else(|| StatsError::Validation(format!("Invalid season label: {label}")))
    }

    /// Label of the season `now` falls in
    pub fn current_label(&self, now: DateTime<Utc>) -> String {
        let year = now.year();
        let first_year = match self.start_of(year) {
            Some(start) if now < start => year - 1,
            _ => year,
        };
        format!("{}-{:02}", first_year, (first_year + 1) % 100)
    }

    fn start_of(&self, year: i32) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(year, self.start_month, self.start_day)?;
        Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
    }
}

/// Tunables for the aggregation engine, passed explicitly into the stats service
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub season_calendar: SeasonCalendar,
    /// Games whose name contains this (case-insensitive) are left out of range totals
    pub scrimmage_pattern: String,
    pub player_trend: TrendStrategy,
    pub roster_trend: TrendStrategy,
    pub team_trend: TrendStrategy,
    /// Games compared against the overall average in summary trends
    pub recent_games_window: usize,
    /// Per-game point values reported in player list entries
    pub recent_points_window: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            season_calendar: SeasonCalendar::default(),
            scrimmage_pattern: "scrimmage".to_string(),
            player_trend: TrendStrategy::Percentage,
            roster_trend: TrendStrategy::Percentage,
            team_trend: TrendStrategy::AbsoluteThreshold { points: 2.0 },
            recent_games_window: 5,
            recent_points_window: 10,
        }
    }
}

impl StatsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let start_month = env_or("STATS_SEASON_START_MONTH", defaults.season_calendar.start_month);
        let start_day = env_or("STATS_SEASON_START_DAY", defaults.season_calendar.start_day);
        let season_calendar =
            SeasonCalendar::checked(start_month, start_day).unwrap_or_else(|| {
                warn!(
                    start_month,
                    start_day, "Season start is not a valid date every year, using default"
                );
                defaults.season_calendar
            });

        let threshold = env_or("STATS_TREND_THRESHOLD_POINTS", 2.0);

        let config = Self {
            season_calendar,
            scrimmage_pattern: std::env::var("STATS_SCRIMMAGE_PATTERN")
                .unwrap_or(defaults.scrimmage_pattern),
            team_trend: TrendStrategy::AbsoluteThreshold { points: threshold },
            ..defaults
        };

        debug!(?config, "Loaded stats configuration");
        config
    }
}

/// Process-level settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// When unset the server runs against in-memory stores
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
