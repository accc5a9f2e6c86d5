//! Account endpoints

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};

use crate::domains::accounts::{actions, AuthPayload, LoginInput, SignupInput, UserData};
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;
use crate::server::middleware::AuthUser;

/// POST /api/users/signup
pub async fn signup_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<SignupInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthPayload>)> {
    let Json(input) = body?;
    let payload = actions::signup(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

/// POST /api/users/login
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<Json<AuthPayload>> {
    let Json(input) = body?;
    let payload = actions::login(input, &state.deps).await?;
    Ok(Json(payload))
}

/// GET /api/users/me
pub async fn me_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> ApiResult<Json<UserData>> {
    let app_state = AuthUser::app_state(auth_user.map(|Extension(u)| u));
    let user = actions::current_user(&app_state, &state.deps).await?;
    Ok(Json(user))
}
