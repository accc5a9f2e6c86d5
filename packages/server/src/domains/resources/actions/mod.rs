//! Resource actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers.

mod mutations;
mod queries;

pub use mutations::{create_resource, recommend_resource};
pub use queries::search_resources;
