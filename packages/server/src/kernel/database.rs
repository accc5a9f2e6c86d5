//! Store connection and schema migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Embedded migrations from `packages/server/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool against `database_url`.
///
/// WAL mode lets readers proceed while a writer holds the lock; the busy
/// timeout makes concurrent writers queue instead of failing with
/// `SQLITE_BUSY`. Foreign keys are switched on for every connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}
