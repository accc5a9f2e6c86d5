//! Typed ID definitions for all domain entities.
//!
//! # Example
//!
//! ```rust
//! use directory_core::common::{ResourceId, ReviewId};
//!
//! let resource_id = ResourceId::new(1).unwrap();
//! let review_id = ReviewId::new(1).unwrap();
//!
//! // This would be a compile error:
//! // let wrong: ReviewId = resource_id;
//! ```

// Re-export the core Id type
pub use super::id::{Id, IdError};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (accounts).
pub struct User;

/// Marker type for healthcare Resource entities.
pub struct Resource;

/// Marker type for Review entities.
pub struct Review;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Resource entities.
pub type ResourceId = Id<Resource>;

/// Typed ID for Review entities.
pub type ReviewId = Id<Review>;
