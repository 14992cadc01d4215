use super::aggregator::chronological;
use super::models::{
    AggregateStatSummary, GameStatLine, ShootingPercentages, StatAverages, StatCounters,
};
use super::trend::{recent_vs_overall, TrendStrategy};

/// `made / attempted` as a whole percent; 0 when nothing was attempted
pub fn shooting_pct(made: u32, attempted: u32) -> u32 {
    percentage(made, attempted)
}

/// `part / whole` as a whole percent; 0 for an empty whole
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Per-game average rounded to one decimal; 0 when there are no games
pub fn average(total: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    round1(total as f64 / games as f64)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl ShootingPercentages {
    pub fn from_counters(counters: &StatCounters) -> Self {
        Self {
            fg_pct: shooting_pct(counters.fg_made, counters.fg_attempted),
            three_pct: shooting_pct(counters.three_made, counters.three_attempted),
            ft_pct: shooting_pct(counters.ft_made, counters.ft_attempted),
        }
    }
}

impl StatAverages {
    pub fn from_totals(totals: &StatCounters, games: u32) -> Self {
        Self {
            points: average(totals.points, games),
            rebounds: average(totals.rebounds, games),
            assists: average(totals.assists, games),
            steals: average(totals.steals, games),
            blocks: average(totals.blocks, games),
            turnovers: average(totals.turnovers, games),
            fouls: average(totals.fouls, games),
            fg_made: average(totals.fg_made, games),
            three_made: average(totals.three_made, games),
            ft_made: average(totals.ft_made, games),
        }
    }
}

/// Rolls per-game lines up into range totals, averages, percentages and trend.
///
/// The trend compares the last `recent_window` games, in start-time order,
/// against the average over every game.
pub fn summarize(
    lines: &[GameStatLine],
    strategy: &TrendStrategy,
    recent_window: usize,
) -> AggregateStatSummary {
    let games = lines.len() as u32;
    let totals: StatCounters = lines.iter().map(|line| &line.counters).sum();

    let per_game_points: Vec<u32> = chronological(lines.iter().cloned())
        .iter()
        .map(|line| line.counters.points)
        .collect();

    AggregateStatSummary {
        games,
        totals,
        averages: StatAverages::from_totals(&totals, games),
        percentages: ShootingPercentages::from_counters(&totals),
        trend: recent_vs_overall(&per_game_points, recent_window, strategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::trend::Trend;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 19, 0, 0).unwrap() + Duration::days(n)
    }

    fn line(game_id: &str, start: DateTime<Utc>, counters: StatCounters) -> GameStatLine {
        GameStatLine {
            game_id: game_id.to_string(),
            game_name: format!("Game {game_id}"),
            start_time: start,
            counters,
        }
    }

    fn points(points: u32) -> StatCounters {
        StatCounters {
            points,
            ..StatCounters::default()
        }
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(5, 0, 0)]
    #[case(2, 3, 67)]
    #[case(1, 3, 33)]
    #[case(1, 2, 50)]
    #[case(3, 3, 100)]
    fn shooting_pct_rounds_and_guards(
        #[case] made: u32,
        #[case] attempted: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(shooting_pct(made, attempted), expected);
    }

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(17, 0, 0.0)]
    #[case(10, 3, 3.3)]
    #[case(20, 3, 6.7)]
    #[case(15, 2, 7.5)]
    fn average_rounds_to_one_decimal(#[case] total: u32, #[case] games: u32, #[case] expected: f64) {
        assert_eq!(average(total, games), expected);
    }

    #[test]
    fn empty_range_summarizes_to_zeros() {
        let summary = summarize(&[], &TrendStrategy::Percentage, 5);
        assert_eq!(summary.games, 0);
        assert!(summary.totals.is_empty());
        assert_eq!(summary.averages, StatAverages::default());
        assert_eq!(summary.percentages, ShootingPercentages::default());
        assert_eq!(summary.trend.trend, Trend::Steady);
    }

    #[test]
    fn sums_lines_and_derives_rates() {
        let lines = vec![
            line(
                "g1",
                day(0),
                StatCounters {
                    points: 5,
                    fg_made: 2,
                    fg_attempted: 3,
                    three_made: 1,
                    three_attempted: 1,
                    rebounds: 4,
                    ..StatCounters::default()
                },
            ),
            line(
                "g2",
                day(7),
                StatCounters {
                    points: 4,
                    fg_made: 2,
                    fg_attempted: 5,
                    three_attempted: 1,
                    ft_attempted: 2,
                    rebounds: 3,
                    ..StatCounters::default()
                },
            ),
        ];

        let summary = summarize(&lines, &TrendStrategy::Percentage, 5);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.totals.points, 9);
        assert_eq!(summary.totals.fg_attempted, 8);
        assert_eq!(summary.averages.points, 4.5);
        assert_eq!(summary.averages.rebounds, 3.5);
        assert_eq!(summary.percentages.fg_pct, 50);
        assert_eq!(summary.percentages.three_pct, 50);
        assert_eq!(summary.percentages.ft_pct, 0);
    }

    #[test]
    fn trend_follows_start_time_not_input_order() {
        // Supplied newest first; chronologically scoring climbs
        let mut lines: Vec<GameStatLine> = (0..6)
            .map(|n| line(&format!("g{n}"), day(n), points(if n < 3 { 4 } else { 12 })))
            .collect();
        lines.reverse();

        let summary = summarize(&lines, &TrendStrategy::Percentage, 3);
        // overall mean 8, last three mean 12
        assert_eq!(summary.trend.change_pct, 50.0);
        assert_eq!(summary.trend.trend, Trend::RapidlyImproving);
    }

    #[test]
    fn summarize_is_deterministic() {
        let lines: Vec<GameStatLine> = (0..4)
            .map(|n| line(&format!("g{n}"), day(n), points(7 + n as u32)))
            .collect();

        let first = summarize(&lines, &TrendStrategy::Percentage, 5);
        let second = summarize(&lines, &TrendStrategy::Percentage, 5);
        assert_eq!(first, second);
    }
}
