//! Current user action

use crate::common::auth::{Actor, Capability};
use crate::common::{AppState, DirectoryError, DirectoryResult};
use crate::domains::accounts::data::UserData;
use crate::domains::accounts::models::User;
use crate::kernel::ServerDeps;

/// Look up the account behind the resolved identity.
///
/// A token for a user that no longer exists is treated as not-found so
/// clients can drop their stale session.
pub async fn current_user(state: &AppState, deps: &ServerDeps) -> DirectoryResult<UserData> {
    let identity = Actor::new(state.identity())
        .can(Capability::ViewOwnAccount)
        .require()?;

    User::find_by_id_optional(identity.user_id, &deps.db_pool)
        .await?
        .map(UserData::from)
        .ok_or(DirectoryError::NotFound("User"))
}
