use axum::http::StatusCode;
use serde_json::json;

mod utils;

use utils::*;

#[tokio::test]
async fn test_health_check() {
    let setup = TestSetupBuilder::new().build().await;
    let (status, _) = setup.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_player_line_from_recorded_shots() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    setup
        .record_all(vec![
            EventBuilder::team("p1", "fg_made").game("g1").build(),
            EventBuilder::team("p1", "fg_missed").game("g1").build(),
            EventBuilder::team("p1", "three_made").game("g1").quarter(2).build(),
        ])
        .await;

    let (status, body) = setup.get_json("/players/p1/stats").await;
    assert_eq!(status, StatusCode::OK);

    let line = &body["game_stats"][0];
    assert_eq!(line["points"], 5);
    assert_eq!(line["fg_made"], 2);
    assert_eq!(line["fg_attempted"], 3);
    assert_eq!(line["three_made"], 1);
    assert_eq!(line["three_attempted"], 1);
    assert_eq!(body["percentages"]["fg_pct"], 67);
    assert_eq!(body["percentages"]["three_pct"], 100);
}

#[tokio::test]
async fn test_player_without_events_reports_zeros() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    setup
        .record_all(vec![EventBuilder::team("p1", "fg_made").game("g1").build()])
        .await;

    let (status, body) = setup.get_json("/players/p2/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"], 0);
    assert_eq!(body["averages"]["points"], 0.0);
    assert_eq!(body["percentages"]["fg_pct"], 0);
    assert_eq!(body["game_stats"], json!([]));
}

#[tokio::test]
async fn test_team_wins_game_on_points() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    setup
        .record_all(vec![
            EventBuilder::team("p1", "fg_made").game("g1").build(),
            EventBuilder::team("p2", "fg_made").game("g1").build(),
            EventBuilder::opponent("12", "three_made").game("g1").build(),
        ])
        .await;

    let (status, body) = setup.get_json("/team/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wins"], 1);
    assert_eq!(body["losses"], 0);
    assert_eq!(body["games"][0]["team_points"], 4);
    assert_eq!(body["games"][0]["opponent_points"], 3);
}

#[tokio::test]
async fn test_unlinked_event_counts_in_box_score_only() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    setup
        .record_all(vec![
            EventBuilder::team("p1", "fg_made")
                .game("g1")
                .session("s1")
                .build(),
            EventBuilder::team("p1", "three_made").session("s1").build(),
        ])
        .await;
    assert_eq!(setup.event_store.event_count().await, 2);

    let (_, player) = setup.get_json("/players/p1/stats").await;
    assert_eq!(player["games"], 1);
    assert_eq!(player["game_stats"][0]["points"], 2);
    assert_eq!(player["game_stats"][0]["three_attempted"], 0);

    let (status, box_score) = setup.get_json("/sessions/s1/box-score").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(box_score["event_count"], 2);
    assert_eq!(box_score["team"]["points"], 5);
    assert_eq!(box_score["players"][0]["name"], "Ana Ruiz");
}

#[tokio::test]
async fn test_scrimmage_excluded_unless_selected() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .with_game("g2", "Intrasquad Scrimmage")
        .build()
        .await;

    setup
        .record_all(vec![
            EventBuilder::team("p1", "fg_made").game("g1").build(),
            EventBuilder::team("p1", "three_made").game("g2").build(),
        ])
        .await;

    let (_, season) = setup.get_json("/players/p1/stats?range=season").await;
    assert_eq!(season["games"], 1);
    assert_eq!(season["totals"]["points"], 2);

    let (_, picked) = setup.get_json("/players/p1/stats?game_ids=g2").await;
    assert_eq!(picked["games"], 1);
    assert_eq!(picked["totals"]["points"], 3);
}

#[tokio::test]
async fn test_roster_table_lists_every_player() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    setup
        .record_all(vec![
            EventBuilder::team("p2", "ft_made").game("g1").build(),
            EventBuilder::team("p2", "ft_missed").game("g1").build(),
            EventBuilder::team("p2", "rebound")
                .game("g1")
                .metadata(json!({"kind": "rebound", "offensive": true}))
                .build(),
        ])
        .await;

    let (status, body) = setup.get_json("/players/stats?range=last30days").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Ana Ruiz");
    assert_eq!(rows[0]["games"], 0);
    assert_eq!(rows[1]["name"], "Bea Cole");
    assert_eq!(rows[1]["totals"]["rebounds"], 1);
    assert_eq!(rows[1]["percentages"]["ft_pct"], 50);
    assert_eq!(rows[1]["recent_points"], json!([1]));
}

#[tokio::test]
async fn test_deleted_event_drops_out_of_stats() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    let (status, event) = setup
        .post_event(EventBuilder::team("p1", "three_made").game("g1").build())
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let event_id = event["id"].as_str().unwrap();
    assert_eq!(
        setup.delete(&format!("/events/{event_id}")).await,
        StatusCode::NO_CONTENT
    );

    let (_, body) = setup.get_json("/players/p1/stats").await;
    assert_eq!(body["games"], 0);
    assert_eq!(body["totals"]["points"], 0);
}

#[tokio::test]
async fn test_invalid_events_and_ranges_are_rejected() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    // Opponent events are keyed by jersey, never by player
    let mut body = EventBuilder::opponent("12", "steal").game("g1").build();
    body["player_id"] = json!("p1");
    let (status, _) = setup.post_event(body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = setup
        .post_event(EventBuilder::team("p1", "dunk_contest").build())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = setup.get_json("/team/stats?range=custom").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert_eq!(setup.event_store.event_count().await, 0);
}

#[tokio::test]
async fn test_point_override_counts_end_to_end() {
    let setup = TestSetupBuilder::new()
        .with_two_players()
        .with_game("g1", "Home vs Hawks")
        .build()
        .await;

    // And-one recorded as a single three-point make
    setup
        .record_all(vec![
            EventBuilder::team("p1", "fg_made").game("g1").value(3).build(),
            EventBuilder::team("p1", "fg_made").game("g1").build(),
        ])
        .await;

    let (status, _) = setup
        .post_event(
            EventBuilder::team("p1", "fg_made")
                .game("g1")
                .value(u32::MAX)
                .build(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = setup.get_json("/players/p1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game_stats"][0]["points"], 5);
    assert_eq!(body["game_stats"][0]["fg_made"], 2);
    assert_eq!(setup.event_store.event_count().await, 2);
}
