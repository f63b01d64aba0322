//! Stride service entry point.
//!
//! Hosts the HTTP query gateway over the goal ledger. The chat gateway is
//! exposed through the library (`adapters::chat::ChatRouter` plus the
//! `ReplySink` port); binding it to a concrete messenger transport happens
//! outside this binary.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use stride::adapters::http::{app, GoalsState};
use stride::adapters::sqlite::{connect_pool, SqliteGoalStore};
use stride::application::GoalLedger;
use stride::config::AppConfig;
use stride::domain::clock::PeriodClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = connect_pool(&config.database).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let clock = PeriodClock::new(config.tracking.cutoff_hour)?;
    let store = Arc::new(SqliteGoalStore::new(pool));
    let ledger = Arc::new(GoalLedger::new(store, clock));

    let addr = config.server.socket_addr()?;
    let router = app(GoalsState::new(ledger), &config.server);

    tracing::info!(%addr, "goal query gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
