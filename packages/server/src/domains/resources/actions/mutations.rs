//! Resource mutation actions
//!
//! Every mutation needs a resolved identity. Anything that reads or writes
//! the recommendation counter goes through the schema guard so a store that
//! still has the legacy column name heals itself on first use.

use tracing::info;

use crate::common::{
    constraint_violation, Actor, AppState, Capability, ConstraintViolation, DirectoryError,
    DirectoryResult, ResourceId,
};
use crate::domains::resources::data::{CreateResourceInput, ResourceData};
use crate::domains::resources::models::Resource;
use crate::kernel::ServerDeps;

/// Submit a new resource. It starts with no recommendations and no reviews.
pub async fn create_resource(
    input: CreateResourceInput,
    state: &AppState,
    deps: &ServerDeps,
) -> DirectoryResult<ResourceData> {
    let identity = Actor::new(state.identity())
        .can(Capability::CreateResource)
        .require()?;
    let input = input.validate()?;
    let pool = &deps.db_pool;

    let resource = deps
        .schema_guard
        .retry_on_missing_counter(|| Resource::create(&input, pool))
        .await
        .map_err(|err| match constraint_violation(&err) {
            Some(ConstraintViolation::Check) => {
                DirectoryError::invalid("resource rejected by store")
            }
            _ => DirectoryError::Store(err),
        })?;

    info!(
        resource_id = %resource.id,
        user_id = %identity.user_id,
        category = %resource.category,
        "Resource created"
    );

    Ok(ResourceData::from(resource))
}

/// Add one recommendation to a resource and return it with the new count.
///
/// A malformed id is rejected before the store is touched. An unknown id is
/// not-found and creates nothing.
pub async fn recommend_resource(
    resource_id: &str,
    state: &AppState,
    deps: &ServerDeps,
) -> DirectoryResult<ResourceData> {
    let identity = Actor::new(state.identity())
        .can(Capability::RecommendResource)
        .require()?;
    let id = ResourceId::parse(resource_id)?;
    let pool = &deps.db_pool;

    let resource = deps
        .schema_guard
        .retry_on_missing_counter(|| Resource::increment_recommendations(id, pool))
        .await?
        .ok_or(DirectoryError::NotFound("Resource"))?;

    info!(
        resource_id = %id,
        user_id = %identity.user_id,
        recommendations = resource.recommendation_count,
        "Resource recommended"
    );

    Ok(ResourceData::from(resource))
}
