use serde::{Deserialize, Serialize};

use super::rollup::round1;

/// How a recent-performance comparison is turned into a [`Trend`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendStrategy {
    /// Relative change: >25% rapidly improving, >5% improving, < -25% declining
    Percentage,
    /// Absolute per-game point difference beyond `points` in either direction
    AbsoluteThreshold { points: f64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    RapidlyImproving,
    Improving,
    #[default]
    Steady,
    Declining,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSignal {
    pub trend: Trend,
    /// Percent change of the compared value over the base, one decimal
    pub change_pct: f64,
}

/// `(compare - base) / base * 100`; a zero base counts as +100% when anything was scored
pub fn percent_change(base: f64, compare: f64) -> f64 {
    if base == 0.0 {
        if compare > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (compare - base) / base * 100.0
    }
}

impl TrendStrategy {
    pub fn classify(&self, base: f64, compare: f64) -> TrendSignal {
        let change = percent_change(base, compare);

        let trend = match *self {
            TrendStrategy::Percentage => {
                if change > 25.0 {
                    Trend::RapidlyImproving
                } else if change > 5.0 {
                    Trend::Improving
                } else if change < -25.0 {
                    Trend::Declining
                } else {
                    Trend::Steady
                }
            }
            TrendStrategy::AbsoluteThreshold { points } => {
                let diff = compare - base;
                if diff > points {
                    Trend::Improving
                } else if diff < -points {
                    Trend::Declining
                } else {
                    Trend::Steady
                }
            }
        };

        TrendSignal {
            trend,
            change_pct: round1(change),
        }
    }
}

/// Average of the last `window` values against the average of all of them.
///
/// `per_game_points` must be in chronological order.
pub fn recent_vs_overall(
    per_game_points: &[u32],
    window: usize,
    strategy: &TrendStrategy,
) -> TrendSignal {
    if per_game_points.is_empty() || window == 0 {
        return TrendSignal::default();
    }

    let recent = &per_game_points[per_game_points.len().saturating_sub(window)..];
    strategy.classify(mean(per_game_points), mean(recent))
}

/// First against last of the most recent `window` values (chronological input)
pub fn series_trend(per_game_points: &[u32], window: usize, strategy: &TrendStrategy) -> TrendSignal {
    let recent = &per_game_points[per_game_points.len().saturating_sub(window)..];
    match (recent.first(), recent.last()) {
        (Some(&first), Some(&last)) => strategy.classify(first as f64, last as f64),
        _ => TrendSignal::default(),
    }
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, 13.0, Trend::RapidlyImproving)] // +30%
    #[case(10.0, 11.0, Trend::Improving)] // +10%
    #[case(10.0, 9.5, Trend::Steady)] // -5%
    #[case(10.0, 8.0, Trend::Steady)] // -20%
    #[case(10.0, 7.0, Trend::Declining)] // -30%
    fn percentage_bands(#[case] base: f64, #[case] compare: f64, #[case] expected: Trend) {
        assert_eq!(TrendStrategy::Percentage.classify(base, compare).trend, expected);
    }

    #[rstest]
    #[case(10.0, 12.5, Trend::Improving)]
    #[case(10.0, 12.0, Trend::Steady)]
    #[case(10.0, 7.5, Trend::Declining)]
    #[case(10.0, 8.0, Trend::Steady)]
    fn absolute_threshold_bands(#[case] base: f64, #[case] compare: f64, #[case] expected: Trend) {
        let strategy = TrendStrategy::AbsoluteThreshold { points: 2.0 };
        assert_eq!(strategy.classify(base, compare).trend, expected);
    }

    #[test]
    fn zero_base_is_full_increase_or_nothing() {
        assert_eq!(percent_change(0.0, 4.0), 100.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);

        let signal = TrendStrategy::Percentage.classify(0.0, 4.0);
        assert_eq!(signal.trend, Trend::RapidlyImproving);
        assert_eq!(signal.change_pct, 100.0);
    }

    #[test]
    fn change_is_rounded_to_one_decimal() {
        let signal = TrendStrategy::Percentage.classify(3.0, 4.0);
        assert_eq!(signal.change_pct, 33.3);
    }

    #[test]
    fn recent_window_compares_against_full_average() {
        // overall mean 10, last five mean 14
        let points = [6, 6, 6, 6, 6, 14, 14, 14, 14, 14];
        let signal = recent_vs_overall(&points, 5, &TrendStrategy::Percentage);
        assert_eq!(signal.change_pct, 40.0);
        assert_eq!(signal.trend, Trend::RapidlyImproving);
    }

    #[test]
    fn short_history_uses_every_game() {
        let signal = recent_vs_overall(&[8, 12], 5, &TrendStrategy::Percentage);
        assert_eq!(signal.trend, Trend::Steady);
        assert_eq!(signal.change_pct, 0.0);

        assert_eq!(
            recent_vs_overall(&[], 5, &TrendStrategy::Percentage),
            TrendSignal::default()
        );
    }

    #[test]
    fn series_trend_uses_first_and_last_of_window() {
        // window of 3 keeps [10, 4, 13]
        let signal = series_trend(&[30, 10, 4, 13], 3, &TrendStrategy::Percentage);
        assert_eq!(signal.change_pct, 30.0);
        assert_eq!(signal.trend, Trend::RapidlyImproving);

        assert_eq!(
            series_trend(&[], 10, &TrendStrategy::Percentage),
            TrendSignal::default()
        );
        assert_eq!(
            series_trend(&[7], 10, &TrendStrategy::Percentage).trend,
            Trend::Steady
        );
    }
}
