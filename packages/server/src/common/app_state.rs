//! Per-request state handed to every action.

use serde::{Deserialize, Serialize};

use super::UserId;

/// The authenticated user, as resolved by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}

/// Request-scoped data: who is asking, if anyone.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The resolved identity, if the request carried a valid token.
    pub visitor: Option<Identity>,
}

impl AppState {
    /// Create state for an authenticated visitor.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            visitor: Some(identity),
        }
    }

    /// Create state for an unauthenticated/anonymous request.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Check if the visitor is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.visitor.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.visitor.as_ref()
    }
}
