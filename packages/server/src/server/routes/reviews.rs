//! Review endpoints

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};

use crate::common::auth::{Actor, Capability};
use crate::common::DirectoryError;
use crate::domains::reviews::{self, CreateReviewInput, ReviewData};
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;
use crate::server::middleware::AuthUser;

/// POST /api/reviews
pub async fn create_review_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    body: Result<Json<CreateReviewInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReviewData>)> {
    let app_state = AuthUser::app_state(auth_user.map(|Extension(u)| u));
    Actor::new(app_state.identity())
        .can(Capability::CreateReview)
        .require()
        .map_err(DirectoryError::from)?;
    let Json(input) = body?;

    let review = reviews::create_review(input, &app_state, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
