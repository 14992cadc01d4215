use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    config::StatsConfig,
    events::{EventQuery, EventStore, GameEvent, GameMetadata, TimeRange},
    roster::RosterRepository,
};

use super::{
    aggregator::{aggregate_by_game, chronological, flat_totals},
    models::{GameStatLine, ShootingPercentages},
    rollup::{average, summarize},
    splitter::{game_outcomes, split_by_side, WinLossRecord},
    trend::series_trend,
    types::{BoxScoreLine, PlayerListEntry, PlayerSummary, SessionBoxScore, TeamSummary},
    StatsError,
};

/// Box-score key for events that carry neither a player id nor a jersey
const UNATTRIBUTED: &str = "unattributed";

/// Events in scope for one request plus the games they reference
struct ScopedEvents {
    events: Vec<GameEvent>,
    games: HashMap<String, GameMetadata>,
}

/// Builds stats responses from a fresh event query on every call.
///
/// Holds no state between requests; `now` is always supplied by the caller.
pub struct StatsService {
    event_store: Arc<dyn EventStore>,
    roster: Arc<dyn RosterRepository>,
    config: Arc<StatsConfig>,
}

impl StatsService {
    pub fn new(
        event_store: Arc<dyn EventStore>,
        roster: Arc<dyn RosterRepository>,
        config: Arc<StatsConfig>,
    ) -> Self {
        Self {
            event_store,
            roster,
            config,
        }
    }

    /// Totals, averages, percentages and per-game lines for one player
    #[instrument(skip(self))]
    pub async fn player_summary(
        &self,
        player_id: &str,
        range: &TimeRange,
        now: DateTime<Utc>,
    ) -> Result<PlayerSummary, StatsError> {
        let query =
            EventQuery::for_range(range, &self.config.season_calendar, now)?.with_player(player_id);

        let (player, scoped) = futures::try_join!(
            self.roster.get_player(player_id),
            self.load_scoped_events(&query, range)
        )?;
        let player =
            player.ok_or_else(|| StatsError::NotFound(format!("Player {player_id} not found")))?;

        let team_events = scoped.events.iter().filter(|e| !e.is_opponent_event);
        let game_stats = chronological(aggregate_by_game(team_events, &scoped.games).into_values());

        let summary = summarize(
            &game_stats,
            &self.config.player_trend,
            self.config.recent_games_window,
        );
        let recent = game_stats
            .iter()
            .rev()
            .take(self.config.recent_games_window)
            .cloned()
            .collect();

        info!(
            player_id,
            games = summary.games,
            points = summary.totals.points,
            "Player summary built"
        );

        Ok(PlayerSummary {
            player,
            summary,
            recent,
            game_stats,
        })
    }

    /// One row per roster player, including players with no events in range
    #[instrument(skip(self))]
    pub async fn players_summary(
        &self,
        range: &TimeRange,
        now: DateTime<Utc>,
    ) -> Result<Vec<PlayerListEntry>, StatsError> {
        let query = EventQuery::for_range(range, &self.config.season_calendar, now)?;

        let (players, scoped) = futures::try_join!(
            self.roster.list_players(),
            self.load_scoped_events(&query, range)
        )?;

        let mut by_player: HashMap<&str, Vec<&GameEvent>> = HashMap::new();
        for event in scoped.events.iter().filter(|e| !e.is_opponent_event) {
            if let Some(player_id) = event.player_id.as_deref() {
                by_player.entry(player_id).or_default().push(event);
            }
        }

        let window = self.config.recent_points_window;
        let entries: Vec<PlayerListEntry> = players
            .into_iter()
            .map(|player| {
                let events = by_player.remove(player.id.as_str()).unwrap_or_default();
                let lines: Vec<GameStatLine> =
                    chronological(aggregate_by_game(events, &scoped.games).into_values());
                let summary = summarize(
                    &lines,
                    &self.config.roster_trend,
                    self.config.recent_games_window,
                );

                let per_game: Vec<u32> = lines.iter().map(|l| l.counters.points).collect();
                let signal = series_trend(&per_game, window, &self.config.roster_trend);
                let recent_points = per_game[per_game.len().saturating_sub(window)..].to_vec();

                PlayerListEntry {
                    id: player.id,
                    name: player.name,
                    position: player.position,
                    number: player.number,
                    games: summary.games,
                    totals: summary.totals,
                    averages: summary.averages,
                    percentages: summary.percentages,
                    trend: signal.trend,
                    change_pct: signal.change_pct,
                    recent_points,
                }
            })
            .collect();

        if !by_player.is_empty() {
            debug!(
                off_roster = by_player.len(),
                "Events for players missing from the roster were not listed"
            );
        }

        info!(players = entries.len(), "Players summary built");
        Ok(entries)
    }

    /// Win/loss record and parallel team and opponent summaries
    #[instrument(skip(self))]
    pub async fn team_summary(
        &self,
        range: &TimeRange,
        now: DateTime<Utc>,
    ) -> Result<TeamSummary, StatsError> {
        let query = EventQuery::for_range(range, &self.config.season_calendar, now)?;
        let scoped = self.load_scoped_events(&query, range).await?;

        let (team_events, opponent_events) = split_by_side(&scoped.events);
        let team_lines = aggregate_by_game(team_events, &scoped.games);
        let opponent_lines = aggregate_by_game(opponent_events, &scoped.games);

        let outcomes = game_outcomes(&team_lines, &opponent_lines);
        let record = WinLossRecord::from_outcomes(&outcomes);
        let games = outcomes.len() as u32;

        let window = self.config.recent_games_window;
        let team = summarize(
            &chronological(team_lines.into_values()),
            &self.config.team_trend,
            window,
        );
        let opponent = summarize(
            &chronological(opponent_lines.into_values()),
            &self.config.team_trend,
            window,
        );

        info!(
            games,
            wins = record.wins,
            losses = record.losses,
            "Team summary built"
        );

        Ok(TeamSummary {
            wins: record.wins,
            losses: record.losses,
            ties: record.ties,
            win_percentage: record.win_percentage,
            ppg: average(team.totals.points, games),
            oppg: average(opponent.totals.points, games),
            team,
            opponent,
            games: outcomes,
        })
    }

    /// Running team and opponent totals for one tracking session.
    ///
    /// No per-game lines are built here, so events without a game id count.
    #[instrument(skip(self))]
    pub async fn session_box_score(&self, session_id: &str) -> Result<SessionBoxScore, StatsError> {
        let query = EventQuery::for_session(session_id);
        let (events, players) = futures::try_join!(
            self.event_store.query_events(&query),
            self.roster.list_players()
        )?;

        let names: HashMap<&str, &str> = players
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();

        let (team_events, opponent_events) = split_by_side(&events);
        let team = flat_totals(team_events.iter().copied());
        let opponent = flat_totals(opponent_events.iter().copied());

        let mut by_player: BTreeMap<&str, Vec<&GameEvent>> = BTreeMap::new();
        for &event in &team_events {
            let key = event.player_id.as_deref().unwrap_or(UNATTRIBUTED);
            by_player.entry(key).or_default().push(event);
        }

        let mut by_jersey: BTreeMap<&str, Vec<&GameEvent>> = BTreeMap::new();
        for &event in &opponent_events {
            let key = event.opponent_jersey.as_deref().unwrap_or(UNATTRIBUTED);
            by_jersey.entry(key).or_default().push(event);
        }

        let player_lines = by_player
            .into_iter()
            .map(|(subject, events)| {
                box_line(subject, names.get(subject).map(|n| n.to_string()), events)
            })
            .collect();
        let opponent_lines = by_jersey
            .into_iter()
            .map(|(subject, events)| box_line(subject, None, events))
            .collect();

        info!(
            session_id,
            events = events.len(),
            team_points = team.points,
            opponent_points = opponent.points,
            "Session box score built"
        );

        Ok(SessionBoxScore {
            session_id: session_id.to_string(),
            event_count: events.len(),
            team,
            team_percentages: ShootingPercentages::from_counters(&team),
            opponent,
            opponent_percentages: ShootingPercentages::from_counters(&opponent),
            players: player_lines,
            opponents: opponent_lines,
        })
    }

    /// Queries events and game metadata, then drops scrimmages unless games were picked by id
    async fn load_scoped_events(
        &self,
        query: &EventQuery,
        range: &TimeRange,
    ) -> Result<ScopedEvents, StatsError> {
        let mut events = self.event_store.query_events(query).await?;

        let game_ids: Vec<String> = events
            .iter()
            .filter_map(|e| e.game_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let games: HashMap<String, GameMetadata> = if game_ids.is_empty() {
            HashMap::new()
        } else {
            self.event_store
                .query_games_metadata(&game_ids)
                .await?
                .into_iter()
                .map(|g| (g.id.clone(), g))
                .collect()
        };

        if !range.is_game_selection() {
            let scrimmages: HashSet<&str> = games
                .values()
                .filter(|g| g.is_scrimmage(&self.config.scrimmage_pattern))
                .map(|g| g.id.as_str())
                .collect();

            if !scrimmages.is_empty() {
                let before = events.len();
                events.retain(|e| {
                    e.game_id
                        .as_deref()
                        .map_or(true, |id| !scrimmages.contains(id))
                });
                debug!(
                    scrimmages = scrimmages.len(),
                    excluded_events = before - events.len(),
                    "Excluded scrimmage games from range totals"
                );
            }
        }

        let unlinked = events.iter().filter(|e| e.game_id.is_none()).count();
        if unlinked > 0 {
            debug!(unlinked, "Events without a game id are left out of per-game lines");
        }

        Ok(ScopedEvents { events, games })
    }
}

fn box_line(subject: &str, name: Option<String>, events: Vec<&GameEvent>) -> BoxScoreLine {
    let counters = flat_totals(events);
    BoxScoreLine {
        subject: subject.to_string(),
        name,
        counters,
        percentages: ShootingPercentages::from_counters(&counters),
    }
}
