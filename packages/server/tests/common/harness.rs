//! Test harness backed by a throwaway SQLite database.
//!
//! Every test gets its own database file inside a temporary directory, with
//! migrations applied, so tests can run in parallel without sharing rows.

use anyhow::{Context, Result};
use axum::Router;
use directory_core::common::{AppState, Identity};
use directory_core::domains::accounts::{Argon2PasswordHasher, JwtService};
use directory_core::kernel::{connect, ServerDeps, MIGRATOR};
use directory_core::server::build_app;
use directory_core::server::middleware::RateLimit;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

// Store created by the first deployments: the counter is still `likes`,
// reviews may lack an author, and timestamps use SQLite's CURRENT_TIMESTAMP
// text format.
const LEGACY_SCHEMA: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    isAdmin INTEGER DEFAULT 0
);
CREATE TABLE healthcare_resources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    country TEXT NOT NULL,
    description TEXT,
    region TEXT NOT NULL,
    lat REAL NOT NULL,
    lon REAL NOT NULL,
    likes INTEGER DEFAULT 0
);
CREATE TABLE reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    resource_id INTEGER NOT NULL,
    user_id INTEGER,
    review TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (resource_id) REFERENCES healthcare_resources(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);
CREATE UNIQUE INDEX idx_reviews_unique ON reviews(resource_id, user_id);
CREATE INDEX idx_resources_region ON healthcare_resources(region);
CREATE INDEX idx_reviews_resource ON reviews(resource_id);
CREATE TRIGGER trg_reviews_validate_insert
BEFORE INSERT ON reviews
FOR EACH ROW
BEGIN
    SELECT
        CASE
            WHEN NEW.user_id IS NULL THEN RAISE(ABORT, 'user_id required')
            WHEN length(trim(NEW.review)) < 1 THEN RAISE(ABORT, 'Review must be 1-500 chars')
            WHEN length(trim(NEW.review)) > 500 THEN RAISE(ABORT, 'Review must be 1-500 chars')
        END;
END;
"#;

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: SqlitePool,
    /// Dependencies handed to actions, sharing `db_pool`.
    pub deps: ServerDeps,
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    /// Fresh database with the current schema.
    pub async fn new() -> Result<Self> {
        Self::build(None).await
    }

    /// Database laid out the way the first deployments created it.
    ///
    /// Migrations are applied on top, the way a deployed store would see
    /// them, so only the counter column is out of date.
    pub async fn legacy() -> Result<Self> {
        Self::build(Some(LEGACY_SCHEMA)).await
    }

    async fn build(seed_schema: Option<&str>) -> Result<Self> {
        init_tracing();

        let dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let url = format!("sqlite://{}", dir.path().join("directory.db").display());
        let db_pool = connect(&url, 8)
            .await
            .context("Failed to open test database")?;

        if let Some(schema) = seed_schema {
            sqlx::raw_sql(schema)
                .execute(&db_pool)
                .await
                .context("Failed to create legacy schema")?;
        }

        MIGRATOR
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;

        let deps = ServerDeps::new(
            db_pool.clone(),
            Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
            Arc::new(Argon2PasswordHasher::fast_insecure()),
        );

        Ok(Self {
            db_pool,
            deps,
            _dir: dir,
        })
    }

    /// Request state for a signed-in user.
    pub fn as_user(&self, identity: &Identity) -> AppState {
        AppState::authenticated(identity.clone())
    }

    /// Request state for an anonymous visitor.
    pub fn anonymous(&self) -> AppState {
        AppState::anonymous()
    }

    /// Router wired to this harness's dependencies, with the default rate limit.
    pub fn router(&self) -> Router {
        self.router_with_rate_limit(RateLimit::default())
    }

    pub fn router_with_rate_limit(&self, rate_limit: RateLimit) -> Router {
        build_app(self.deps.clone(), &[], rate_limit)
    }

    /// Bearer token for `identity`.
    pub fn token_for(&self, identity: &Identity) -> String {
        self.deps
            .jwt_service
            .create_token(identity.user_id, identity.username.clone())
            .expect("Failed to sign test token")
    }
}

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
