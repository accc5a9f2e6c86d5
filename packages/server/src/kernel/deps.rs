//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container passed to every
//! catalog, review and account action. The store handle lives here and
//! nowhere else.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domains::accounts::{Argon2PasswordHasher, JwtService};
use crate::kernel::{BasePasswordHasher, SchemaGuard};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: SqlitePool,
    /// Heals the legacy counter column; shared so the rename runs once per process
    pub schema_guard: SchemaGuard,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    pub password_hasher: Arc<dyn BasePasswordHasher>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        password_hasher: Arc<dyn BasePasswordHasher>,
    ) -> Self {
        let schema_guard = SchemaGuard::new(db_pool.clone());
        Self {
            db_pool,
            schema_guard,
            jwt_service,
            password_hasher,
        }
    }

    /// Production wiring: Argon2id hashing.
    pub fn with_defaults(db_pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self::new(db_pool, jwt_service, Arc::new(Argon2PasswordHasher::default()))
    }

    pub fn db_pool(&self) -> &SqlitePool {
        &self.db_pool
    }
}
