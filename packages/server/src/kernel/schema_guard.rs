//! Schema guard for the resource counter column.
//!
//! Early deployments stored the popularity counter as `likes`. The canonical
//! name is `recommendations`. The guard renames the column in place, once,
//! and writes a `schema_meta` marker so the upgrade is visible to operators.
//!
//! It runs in two places:
//! - at startup, right after migrations, as an idempotent step;
//! - from any catalog query that touches the counter, when it fails because
//!   the canonical column is missing (an instance that skipped the startup
//!   step). This path only renames; it never writes the marker on its own.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Table holding healthcare resources.
pub const RESOURCE_TABLE: &str = "healthcare_resources";

/// Canonical counter column.
pub const COUNTER_COLUMN: &str = "recommendations";

/// Name the counter had before the rename.
pub const LEGACY_COUNTER_COLUMN: &str = "likes";

/// `schema_meta` key recording which counter column the store exposes.
pub const COUNTER_COLUMN_KEY: &str = "counter_column";

/// What the resource table currently looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterColumnState {
    Canonical,
    Legacy,
    Missing,
}

/// Result of running the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    AlreadyCanonical,
    Migrated,
}

#[derive(Clone)]
pub struct SchemaGuard {
    pool: SqlitePool,
    // Serializes in-process attempts so concurrent first callers don't race the DDL.
    lock: Arc<Mutex<()>>,
    migrations_applied: Arc<AtomicUsize>,
}

impl SchemaGuard {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            lock: Arc::new(Mutex::new(())),
            migrations_applied: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of renames this guard has performed since it was created.
    pub fn migrations_applied(&self) -> usize {
        self.migrations_applied.load(Ordering::SeqCst)
    }

    /// Inspect the resource table's columns.
    pub async fn counter_column_state(&self) -> Result<CounterColumnState, sqlx::Error> {
        let columns = sqlx::query_scalar::<_, String>(
            "SELECT name FROM pragma_table_info('healthcare_resources')",
        )
        .fetch_all(&self.pool)
        .await?;

        let state = if columns.iter().any(|c| c == COUNTER_COLUMN) {
            CounterColumnState::Canonical
        } else if columns.iter().any(|c| c == LEGACY_COUNTER_COLUMN) {
            CounterColumnState::Legacy
        } else {
            CounterColumnState::Missing
        };

        Ok(state)
    }

    /// Make sure the counter is reachable under its canonical name.
    ///
    /// Startup step. Safe to call any number of times: once the column is
    /// canonical this only refreshes the marker row.
    pub async fn ensure_counter_column(&self) -> Result<GuardOutcome, sqlx::Error> {
        let outcome = self.heal_counter_column().await?;
        if outcome == GuardOutcome::AlreadyCanonical {
            self.record_marker().await?;
        }
        Ok(outcome)
    }

    /// Rename the legacy column if it is still there.
    ///
    /// Never writes when the column is already canonical. Callers that queued
    /// behind the first rename land here and must not contend with live
    /// counter increments.
    async fn heal_counter_column(&self) -> Result<GuardOutcome, sqlx::Error> {
        let _held = self.lock.lock().await;

        match self.counter_column_state().await? {
            CounterColumnState::Canonical => {
                debug!(table = RESOURCE_TABLE, "Counter column already canonical");
                Ok(GuardOutcome::AlreadyCanonical)
            }
            CounterColumnState::Legacy => {
                warn!(
                    table = RESOURCE_TABLE,
                    from = LEGACY_COUNTER_COLUMN,
                    to = COUNTER_COLUMN,
                    "Renaming legacy counter column"
                );
                self.rename_legacy_column().await?;
                self.migrations_applied.fetch_add(1, Ordering::SeqCst);
                info!(table = RESOURCE_TABLE, "Counter column migrated");
                Ok(GuardOutcome::Migrated)
            }
            CounterColumnState::Missing => {
                Err(sqlx::Error::ColumnNotFound(COUNTER_COLUMN.to_string()))
            }
        }
    }

    /// Run a store operation that touches the counter column, healing a
    /// legacy schema and retrying exactly once if the column is missing.
    ///
    /// Every other failure is returned unchanged.
    pub async fn retry_on_missing_counter<T, F, Fut>(&self, op: F) -> Result<T, sqlx::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        match op().await {
            Err(err) if is_missing_counter_column(&err) => {
                warn!(error = %err, "Counter column missing, running schema guard");
                self.heal_counter_column().await?;
                op().await
            }
            other => other,
        }
    }

    async fn rename_legacy_column(&self) -> Result<(), sqlx::Error> {
        // The ALTER comes first so the transaction starts as a writer.
        let mut tx = self.pool.begin().await?;

        sqlx::query("ALTER TABLE healthcare_resources RENAME COLUMN likes TO recommendations")
            .execute(&mut *tx)
            .await?;
        upsert_marker(&mut tx).await?;

        tx.commit().await
    }

    async fn record_marker(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        upsert_marker(&mut conn).await
    }
}

async fn upsert_marker(conn: &mut sqlx::SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO schema_meta (key, value)
        VALUES (?, ?)
        ON CONFLICT (key) DO UPDATE
        SET value = excluded.value,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE schema_meta.value <> excluded.value
        "#,
    )
    .bind(COUNTER_COLUMN_KEY)
    .bind(COUNTER_COLUMN)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Whether `err` is the store reporting that the canonical counter column
/// does not exist.
///
/// SQLite reports this only through the message text, so the match is on
/// the exact phrase it produces.
pub fn is_missing_counter_column(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .message()
            .contains("no such column: recommendations"),
        sqlx::Error::ColumnNotFound(column) => column == COUNTER_COLUMN,
        _ => false,
    }
}
