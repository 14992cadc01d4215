use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use courtstats::{
    events::{GameMetadata, InMemoryEventStore},
    roster::{InMemoryRosterRepository, PlayerProfile},
    router, AppState, StatsConfig,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub event_store: Arc<InMemoryEventStore>,
    pub app: Router,
}

pub struct TestSetupBuilder {
    players: Vec<PlayerProfile>,
    games: Vec<(String, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            games: vec![],
        }
    }

    pub fn with_player(mut self, id: &str, name: &str) -> Self {
        self.players.push(PlayerProfile::new(id, name));
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_player("p1", "Ana Ruiz").with_player("p2", "Bea Cole")
    }

    pub fn with_game(mut self, id: &str, name: &str) -> Self {
        self.games.push((id.to_string(), name.to_string()));
        self
    }

    pub async fn build(self) -> TestSetup {
        let event_store = Arc::new(InMemoryEventStore::new());
        for (id, name) in self.games {
            event_store
                .add_game(GameMetadata {
                    id,
                    name,
                    start_time: Utc::now(),
                })
                .await;
        }

        let roster = Arc::new(InMemoryRosterRepository::with_players(self.players));
        let state = AppState::new(event_store.clone(), roster, StatsConfig::default());

        TestSetup {
            event_store,
            app: router(state),
        }
    }
}

// ============================================================================
// Request Helpers
// ============================================================================

impl TestSetup {
    pub async fn post_event(&self, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/events")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Posts every payload and asserts each was accepted
    pub async fn record_all(&self, bodies: Vec<Value>) {
        for body in bodies {
            let (status, response) = self.post_event(body).await;
            assert_eq!(status, StatusCode::CREATED, "rejected: {response}");
        }
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await.0
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }
}
