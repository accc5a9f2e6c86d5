//! Resource query actions
//!
//! Actions are self-contained: they normalize their inputs and return final
//! payloads.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::info;

use crate::common::{Actor, AppState, Capability, DirectoryResult, ResourceId};
use crate::domains::resources::data::ResourceData;
use crate::domains::resources::models::Resource;
use crate::domains::reviews::data::ReviewData;
use crate::domains::reviews::models::Review;
use crate::kernel::ServerDeps;

/// Search the catalog by region
///
/// A missing or empty region lists every resource. Any other value, spaces
/// included, is matched verbatim as a substring. Each result carries its
/// reviews, newest first.
pub async fn search_resources(
    region: Option<String>,
    state: &AppState,
    deps: &ServerDeps,
) -> DirectoryResult<Vec<ResourceData>> {
    Actor::new(state.identity())
        .can(Capability::SearchResources)
        .check()?;

    let region = region.filter(|r| !r.is_empty());
    let pool = &deps.db_pool;

    let (resources, reviews) = deps
        .schema_guard
        .retry_on_missing_counter(|| load_listing(region.as_deref(), pool))
        .await?;

    info!(
        region = region.as_deref().unwrap_or("*"),
        results = resources.len(),
        "Searched resources"
    );

    let mut by_resource: HashMap<ResourceId, Vec<ReviewData>> = HashMap::new();
    for review in reviews {
        by_resource
            .entry(review.resource_id)
            .or_default()
            .push(ReviewData::from(review));
    }

    Ok(resources
        .into_iter()
        .map(|resource| {
            let reviews = by_resource.remove(&resource.id).unwrap_or_default();
            ResourceData::new(resource, reviews)
        })
        .collect())
}

/// Resources and their reviews, read from one snapshot.
async fn load_listing(
    region: Option<&str>,
    pool: &SqlitePool,
) -> Result<(Vec<Resource>, Vec<Review>), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let resources = Resource::search(region, &mut *tx).await?;
    let ids: Vec<ResourceId> = resources.iter().map(|r| r.id).collect();
    let reviews = Review::find_for_resources(&ids, &mut *tx).await?;

    tx.commit().await?;
    Ok((resources, reviews))
}
