use courtstats::{
    config::{ServerConfig, StatsConfig},
    events::{EventStore, InMemoryEventStore, PostgresEventStore},
    roster::{InMemoryRosterRepository, PostgresRosterRepository, RosterRepository},
    routes, AppState,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting courtstats server");

    let server_config = ServerConfig::from_env();
    let stats_config = StatsConfig::from_env();
    info!(
        season_start_month = stats_config.season_calendar.start_month,
        season_start_day = stats_config.season_calendar.start_day,
        scrimmage_pattern = %stats_config.scrimmage_pattern,
        "Stats configuration loaded"
    );

    let (event_store, roster_repository): (Arc<dyn EventStore>, Arc<dyn RosterRepository>) =
        match &server_config.database_url {
            Some(database_url) => {
                let pool = sqlx::PgPool::connect(database_url).await?;
                info!("Connected to PostgreSQL");
                (
                    Arc::new(PostgresEventStore::new(pool.clone())),
                    Arc::new(PostgresRosterRepository::new(pool)),
                )
            }
            None => {
                warn!("DATABASE_URL not set, using in-memory stores");
                (
                    Arc::new(InMemoryEventStore::new()),
                    Arc::new(InMemoryRosterRepository::new()),
                )
            }
        };

    let app_state = AppState::new(event_store, roster_repository, stats_config);
    let app = routes::router(app_state);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr).await?;
    info!(bind_addr = %server_config.bind_addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
