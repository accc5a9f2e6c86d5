//! Resources domain - the healthcare resource catalog
//!
//! Responsibilities:
//! - Region search, with each resource's reviews attached
//! - Submission of new resources
//! - The recommendation counter, which only ever goes up by one

pub mod actions;
pub mod data;
pub mod models;

pub use actions::{create_resource, recommend_resource, search_resources};
pub use data::{CreateResourceInput, ResourceData, ValidatedResource};
pub use models::{Category, Resource};
