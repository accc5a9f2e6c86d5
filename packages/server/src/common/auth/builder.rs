use super::{AuthError, Capability};
use crate::common::app_state::Identity;

/// Entry point for authorization checks
///
/// Usage:
/// ```rust,ignore
/// Actor::new(state.identity())
///     .can(Capability::RecommendResource)
///     .check()?;
/// ```
pub struct Actor<'a> {
    identity: Option<&'a Identity>,
}

impl<'a> Actor<'a> {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `identity` - Identity resolved by the session layer, or `None` for anonymous visitors
    pub fn new(identity: Option<&'a Identity>) -> Self {
        Self { identity }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder<'a> {
        CapabilityBuilder {
            identity: self.identity,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder<'a> {
    identity: Option<&'a Identity>,
    capability: Capability,
}

impl<'a> CapabilityBuilder<'a> {
    /// Perform the authorization check
    ///
    /// Returns the identity the capability was granted to. It is `None` only
    /// for read capabilities used anonymously.
    pub fn check(self) -> Result<Option<&'a Identity>, AuthError> {
        check_permission(self.identity, self.capability)
    }

    /// Perform the check and insist on an identity.
    ///
    /// Mutations use this so they get the acting user without a second lookup.
    pub fn require(self) -> Result<&'a Identity, AuthError> {
        self.check()?.ok_or(AuthError::AuthenticationRequired)
    }
}

/// Core permission check function
fn check_permission(
    identity: Option<&Identity>,
    capability: Capability,
) -> Result<Option<&Identity>, AuthError> {
    if capability.requires_identity() && identity.is_none() {
        tracing::debug!(capability = ?capability, "Rejected anonymous mutation");
        return Err(AuthError::AuthenticationRequired);
    }

    Ok(identity)
}
