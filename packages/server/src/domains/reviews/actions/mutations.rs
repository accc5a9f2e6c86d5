//! Review mutation actions

use tracing::{debug, info};

use crate::common::{
    constraint_violation, Actor, AppState, Capability, ConstraintViolation, DirectoryError,
    DirectoryResult,
};
use crate::domains::resources::models::Resource;
use crate::domains::reviews::data::{CreateReviewInput, ReviewData};
use crate::domains::reviews::models::Review;
use crate::kernel::ServerDeps;

/// Attach a review by the current user to a resource.
///
/// Rejects in this order: no identity, invalid input, unknown resource, a
/// review already left by this user. The existence checks only give early
/// answers. The unique index on `(resource_id, user_id)` is what actually
/// prevents duplicates, so a racing insert still comes back as a conflict.
pub async fn create_review(
    input: CreateReviewInput,
    state: &AppState,
    deps: &ServerDeps,
) -> DirectoryResult<ReviewData> {
    let identity = Actor::new(state.identity())
        .can(Capability::CreateReview)
        .require()?;
    let input = input.validate()?;
    let pool = &deps.db_pool;

    if !Resource::exists(input.resource_id, pool).await? {
        return Err(DirectoryError::NotFound("Resource"));
    }

    if Review::has_reviewed(input.resource_id, identity.user_id, pool).await? {
        debug!(
            resource_id = %input.resource_id,
            user_id = %identity.user_id,
            "Duplicate review rejected before insert"
        );
        return Err(already_reviewed());
    }

    let review = Review::create(input.resource_id, identity.user_id, &input.body, pool)
        .await
        .map_err(|err| match constraint_violation(&err) {
            Some(ConstraintViolation::Unique) => already_reviewed(),
            Some(ConstraintViolation::ForeignKey) => DirectoryError::NotFound("Resource"),
            Some(ConstraintViolation::Check) => DirectoryError::invalid("review rejected by store"),
            None => DirectoryError::Store(err),
        })?;

    info!(
        review_id = %review.id,
        resource_id = %review.resource_id,
        user_id = %identity.user_id,
        "Review created"
    );

    Ok(ReviewData::from(review))
}

fn already_reviewed() -> DirectoryError {
    DirectoryError::Conflict("you have already reviewed this resource".to_string())
}
