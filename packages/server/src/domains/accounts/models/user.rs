//! User model - accounts that can recommend and review

use sqlx::SqlitePool;

use crate::common::UserId;

/// A registered account.
///
/// Deliberately not `Serialize`: the password hash never leaves this module
/// except through `UserData`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find user by ID (optional)
    pub async fn find_by_id_optional(
        id: UserId,
        pool: &SqlitePool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, username, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find user by exact (case-sensitive) username
    pub async fn find_by_username(
        username: &str,
        pool: &SqlitePool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user
    ///
    /// A taken username surfaces as the store's unique violation.
    pub async fn create(
        username: &str,
        password_hash: &str,
        pool: &SqlitePool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
    }
}
