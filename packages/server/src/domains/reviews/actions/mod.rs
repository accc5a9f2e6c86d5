//! Review actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers.

mod mutations;
mod queries;

pub use mutations::create_review;
pub use queries::{list_reviews, resource_exists};
