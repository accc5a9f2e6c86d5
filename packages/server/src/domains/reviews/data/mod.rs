//! Review payloads

pub mod review_types;

pub use review_types::{CreateReviewInput, ReviewData, ValidatedReview, REVIEW_MAX};
