//! Reviews domain - short written reviews attached to resources
//!
//! A user reviews a resource at most once. Reviews are never edited.

pub mod actions;
pub mod data;
pub mod models;

pub use actions::{create_review, list_reviews, resource_exists};
pub use data::{CreateReviewInput, ReviewData};
pub use models::Review;
