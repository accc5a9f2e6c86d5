//! Review model - one user's written review of one resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::Sqlite;
use sqlx::{Executor, QueryBuilder, SqliteConnection, SqlitePool};

use crate::common::{ResourceId, ReviewId, UserId, ValidatedPagination};

// SQLite caps bound parameters per statement; stay well below it.
const BATCH_SIZE: usize = 500;

/// Review row joined with the reviewer's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub resource_id: ResourceId,
    /// Empty on rows that predate per-user reviews
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    #[serde(rename = "review")]
    #[sqlx(rename = "review")]
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Review {
    /// Whether `user_id` already reviewed `resource_id`
    pub async fn has_reviewed<'e, E>(
        resource_id: ResourceId,
        user_id: UserId,
        executor: E,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE resource_id = ? AND user_id = ?)",
        )
        .bind(resource_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Insert a review row and return its id
    ///
    /// Does no checks of its own. The unique index on `(resource_id, user_id)`
    /// rejects a second review by the same user, and the foreign keys reject
    /// unknown resources and users.
    pub async fn insert<'e, E>(
        resource_id: ResourceId,
        user_id: UserId,
        body: &str,
        executor: E,
    ) -> Result<ReviewId, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, ReviewId>(
            r#"
            INSERT INTO reviews (resource_id, user_id, review)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(resource_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(executor)
        .await
    }

    /// Find review by ID
    pub async fn find_by_id<'e, E>(id: ReviewId, executor: E) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT r.id, r.resource_id, r.user_id, u.username, r.review, r.created_at
            FROM reviews r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.id = ?
            "#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    /// Insert a review and read it back with the reviewer's username
    pub async fn create(
        resource_id: ResourceId,
        user_id: UserId,
        body: &str,
        pool: &SqlitePool,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id = Self::insert(resource_id, user_id, body, &mut *tx).await?;
        let review = Self::find_by_id(id, &mut *tx).await?;
        tx.commit().await?;
        Ok(review)
    }

    /// One page of reviews for a resource, newest first
    ///
    /// Timestamps are compared through `julianday` because older rows hold
    /// `YYYY-MM-DD HH:MM:SS` text while newer ones are RFC 3339.
    pub async fn find_for_resource(
        resource_id: ResourceId,
        pagination: &ValidatedPagination,
        pool: &SqlitePool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT r.id, r.resource_id, r.user_id, u.username, r.review, r.created_at
            FROM reviews r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.resource_id = ?
            ORDER BY julianday(r.created_at) DESC, r.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(resource_id)
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(pool)
        .await
    }

    /// Batch-load reviews for many resources
    ///
    /// Rows come back grouped by resource, newest first within each group.
    pub async fn find_for_resources(
        resource_ids: &[ResourceId],
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut reviews = Vec::new();

        for chunk in resource_ids.chunks(BATCH_SIZE) {
            let mut builder = QueryBuilder::<Sqlite>::new(
                r#"
                SELECT r.id, r.resource_id, r.user_id, u.username, r.review, r.created_at
                FROM reviews r
                LEFT JOIN users u ON u.id = r.user_id
                WHERE r.resource_id IN ("#,
            );
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(
                ") ORDER BY r.resource_id, julianday(r.created_at) DESC, r.id DESC",
            );

            let mut rows = builder
                .build_query_as::<Self>()
                .fetch_all(&mut *conn)
                .await?;
            reviews.append(&mut rows);
        }

        Ok(reviews)
    }
}
