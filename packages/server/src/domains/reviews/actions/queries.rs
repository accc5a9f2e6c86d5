//! Review query actions

use crate::common::{
    Actor, AppState, Capability, DirectoryError, DirectoryResult, PaginationArgs, ResourceId,
};
use crate::domains::resources::models::Resource;
use crate::domains::reviews::data::ReviewData;
use crate::domains::reviews::models::Review;
use crate::kernel::ServerDeps;

/// One page of a resource's reviews, newest first.
///
/// An unknown resource simply has no reviews.
pub async fn list_reviews(
    resource_id: &str,
    pagination: PaginationArgs,
    state: &AppState,
    deps: &ServerDeps,
) -> DirectoryResult<Vec<ReviewData>> {
    Actor::new(state.identity())
        .can(Capability::ListReviews)
        .check()?;

    let resource_id = ResourceId::parse(resource_id)?;
    let pagination = pagination.validate().map_err(DirectoryError::invalid)?;

    let reviews = Review::find_for_resource(resource_id, &pagination, &deps.db_pool).await?;

    Ok(reviews.into_iter().map(ReviewData::from).collect())
}

/// Whether a resource with this id exists.
///
/// Ids that are not positive integers cannot exist, so they answer `false`
/// without touching the store.
pub async fn resource_exists(resource_id: &str, deps: &ServerDeps) -> DirectoryResult<bool> {
    let Ok(resource_id) = ResourceId::parse(resource_id) else {
        return Ok(false);
    };

    Ok(Resource::exists(resource_id, &deps.db_pool).await?)
}
