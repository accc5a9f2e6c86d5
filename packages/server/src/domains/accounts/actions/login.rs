//! Login action

use anyhow::Context;
use tracing::{debug, info};

use crate::common::{AuthError, DirectoryResult};
use crate::domains::accounts::data::{AuthPayload, LoginInput, UserData};
use crate::domains::accounts::models::User;
use crate::kernel::ServerDeps;

/// Check a username/password pair and issue a token.
///
/// Unknown usernames and wrong passwords produce the same error.
pub async fn login(input: LoginInput, deps: &ServerDeps) -> DirectoryResult<AuthPayload> {
    let credentials = input.validate()?;

    let Some(user) = User::find_by_username(&credentials.username, &deps.db_pool).await? else {
        debug!("Login for unknown username");
        return Err(AuthError::InvalidCredentials.into());
    };

    let hasher = deps.password_hasher.clone();
    let password = credentials.password;
    let stored_hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
        .await
        .context("Password verification task failed")??;

    if !verified {
        debug!(user_id = %user.id, "Login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    info!(user_id = %user.id, "User logged in");

    let token = deps
        .jwt_service
        .create_token(user.id, user.username.clone())?;

    Ok(AuthPayload {
        user: UserData::from(user),
        token,
    })
}
