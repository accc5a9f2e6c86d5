//! Resource catalog endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::auth::{Actor, Capability};
use crate::common::{DirectoryError, PaginationArgs};
use crate::domains::resources::{self, CreateResourceInput, ResourceData};
use crate::domains::reviews::{self, ReviewData};
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;
use crate::server::middleware::AuthUser;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub region: Option<String>,
}

/// GET /api/resources?region=
pub async fn search_resources_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ResourceData>>> {
    let Query(params) = params?;
    let app_state = AuthUser::app_state(auth_user.map(|Extension(u)| u));

    let results = resources::search_resources(params.region, &app_state, &state.deps).await?;
    Ok(Json(results))
}

/// POST /api/resources
pub async fn create_resource_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    body: Result<Json<CreateResourceInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ResourceData>)> {
    let app_state = AuthUser::app_state(auth_user.map(|Extension(u)| u));
    // Identity is checked before the body so anonymous callers always get 401.
    Actor::new(app_state.identity())
        .can(Capability::CreateResource)
        .require()
        .map_err(DirectoryError::from)?;
    let Json(input) = body?;

    let resource = resources::create_resource(input, &app_state, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// POST /api/resources/:id/recommend (also reachable as /like)
pub async fn recommend_resource_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(resource_id): Path<String>,
) -> ApiResult<Json<ResourceData>> {
    let app_state = AuthUser::app_state(auth_user.map(|Extension(u)| u));

    let resource = resources::recommend_resource(&resource_id, &app_state, &state.deps).await?;
    Ok(Json(resource))
}

/// GET /api/resources/:id/reviews?limit=&offset=
pub async fn list_reviews_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(resource_id): Path<String>,
    pagination: Result<Query<PaginationArgs>, QueryRejection>,
) -> ApiResult<Json<Vec<ReviewData>>> {
    let Query(pagination) = pagination?;
    let app_state = AuthUser::app_state(auth_user.map(|Extension(u)| u));

    let reviews =
        reviews::list_reviews(&resource_id, pagination, &app_state, &state.deps).await?;
    Ok(Json(reviews))
}
