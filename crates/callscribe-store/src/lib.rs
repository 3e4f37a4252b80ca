//! Callscribe Store — SQLite persistence for call records.

pub mod schema;
pub mod sqlite_call_repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

/// Connection settings for the call record database.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// `SQLite` connection URL, e.g. `sqlite://callscribe.db?mode=rwc`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

/// Opens the connection pool shared by every request handler.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the database cannot be
/// opened.
pub async fn connect(options: &StoreOptions) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(&options.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(options.busy_timeout);

    SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(connect_options)
        .await
}
