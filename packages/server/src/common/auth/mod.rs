/// Access gate for the directory
///
/// Provides a fluent API for authorization checks in action code:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, Capability};
///
/// // In an action:
/// let identity = Actor::new(state.identity())
///     .can(Capability::CreateReview)
///     .require()?;
/// ```
///
/// The gate only looks at whether an identity was resolved upstream. It never
/// sees credentials.

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use errors::AuthError;
