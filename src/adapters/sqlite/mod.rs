//! SQLite adapters - durable storage for goal-tracking state.

mod goal_store;

pub use goal_store::SqliteGoalStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

/// Opens the SQLite pool described by the database configuration.
///
/// WAL journaling plus the configured busy timeout give the single-writer
/// serialization the ledger's transactions rely on.
///
/// # Errors
///
/// Returns the underlying `sqlx::Error` if the URL is malformed or the
/// database cannot be opened.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout())
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}
