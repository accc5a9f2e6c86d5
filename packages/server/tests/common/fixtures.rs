//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use directory_core::common::{Identity, ResourceId};
use directory_core::domains::accounts::User;
use directory_core::domains::resources::{Category, Resource, ValidatedResource};
use sqlx::SqlitePool;

/// Create a user; the password hash is a placeholder, so it cannot log in.
pub async fn create_user(pool: &SqlitePool, username: &str) -> Result<Identity> {
    let user = User::create(username, "not-a-real-hash", pool).await?;

    Ok(Identity {
        user_id: user.id,
        username: user.username,
    })
}

pub fn resource_fields(name: &str, region: &str) -> ValidatedResource {
    ValidatedResource {
        name: name.to_string(),
        category: Category::Clinic,
        country: "Kenya".to_string(),
        description: "Primary care and vaccinations".to_string(),
        region: region.to_string(),
        lat: -1.2921,
        lon: 36.8219,
    }
}

/// Create a resource with a preset recommendation count
pub async fn create_resource(
    pool: &SqlitePool,
    name: &str,
    region: &str,
    recommendations: i64,
) -> Result<ResourceId> {
    let resource = Resource::create(&resource_fields(name, region), pool).await?;

    sqlx::query("UPDATE healthcare_resources SET recommendations = ? WHERE id = ?")
        .bind(recommendations)
        .bind(resource.id)
        .execute(pool)
        .await?;

    Ok(resource.id)
}

/// Insert a resource into a store that still uses the `likes` column
pub async fn create_legacy_resource(
    pool: &SqlitePool,
    name: &str,
    region: &str,
    likes: Option<i64>,
) -> Result<ResourceId> {
    let id = sqlx::query_scalar::<_, ResourceId>(
        r#"
        INSERT INTO healthcare_resources (name, category, country, description, region, lat, lon, likes)
        VALUES (?, 'Pharmacy', 'Kenya', NULL, ?, 0.5, 36.0, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(region)
    .bind(likes)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Insert a review with an explicit timestamp, bypassing every check
pub async fn insert_review_at(
    pool: &SqlitePool,
    resource_id: ResourceId,
    author: &Identity,
    body: &str,
    created_at: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO reviews (resource_id, user_id, review, created_at) VALUES (?, ?, ?, ?)")
        .bind(resource_id)
        .bind(author.user_id)
        .bind(body)
        .bind(created_at)
        .execute(pool)
        .await?;

    Ok(())
}

/// Number of resource rows in the store
pub async fn resource_count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM healthcare_resources")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Stored recommendation counter for one resource
pub async fn stored_recommendations(pool: &SqlitePool, id: ResourceId) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(recommendations, 0) FROM healthcare_resources WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Insert an account the way the first deployments did: bcrypt hash, no
/// Argon2id.
pub async fn create_legacy_user(pool: &SqlitePool, username: &str, password: &str) -> Result<()> {
    let hash = bcrypt::hash(password, 4)?;
    sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(hash)
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert a review leaving `created_at` to the store default, the way the
/// first deployments wrote them.
pub async fn insert_legacy_review(
    pool: &SqlitePool,
    resource_id: ResourceId,
    author: &Identity,
    body: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO reviews (resource_id, user_id, review) VALUES (?, ?, ?)")
        .bind(resource_id)
        .bind(author.user_id)
        .bind(body)
        .execute(pool)
        .await?;

    Ok(())
}
