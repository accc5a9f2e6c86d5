//! Signup action

use anyhow::Context;
use tracing::info;

use crate::common::{constraint_violation, ConstraintViolation, DirectoryError, DirectoryResult};
use crate::domains::accounts::data::{AuthPayload, SignupInput, UserData};
use crate::domains::accounts::models::User;
use crate::kernel::ServerDeps;

/// Register a new account and issue a token for it.
///
/// The unique index on `users.username` decides whether a name is taken, so
/// two concurrent signups for the same name cannot both succeed.
pub async fn signup(input: SignupInput, deps: &ServerDeps) -> DirectoryResult<AuthPayload> {
    let credentials = input.validate()?;

    let hasher = deps.password_hasher.clone();
    let password = credentials.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .context("Password hashing task failed")??;

    let user = match User::create(&credentials.username, &password_hash, &deps.db_pool).await {
        Ok(user) => user,
        Err(err) if constraint_violation(&err) == Some(ConstraintViolation::Unique) => {
            return Err(DirectoryError::Conflict("username taken".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    info!(user_id = %user.id, "User signed up");

    let token = deps
        .jwt_service
        .create_token(user.id, user.username.clone())?;

    Ok(AuthPayload {
        user: UserData::from(user),
        token,
    })
}
