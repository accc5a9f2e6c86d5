//! Request and response payloads for reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::utils::{char_len, normalize_whitespace};
use crate::common::{DirectoryError, DirectoryResult, IdError, ResourceId, ReviewId};
use crate::domains::reviews::models::Review;

pub const REVIEW_MAX: usize = 500;

/// A review as shown to readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewData {
    pub id: ReviewId,
    pub resource_id: ResourceId,
    pub review: String,
    pub username: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Review> for ReviewData {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            resource_id: review.resource_id,
            review: review.body,
            username: review.username,
            created_at: review.created_at,
        }
    }
}

/// Submitted review
///
/// `resource_id` is kept loose so a string or a fractional number is
/// reported as invalid input rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewInput {
    #[serde(alias = "resourceId")]
    pub resource_id: Option<Value>,
    #[serde(alias = "content", alias = "body")]
    pub review: Option<String>,
}

/// A review submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReview {
    pub resource_id: ResourceId,
    pub body: String,
}

impl CreateReviewInput {
    pub fn new(resource_id: i64, review: impl Into<String>) -> Self {
        Self {
            resource_id: Some(Value::from(resource_id)),
            review: Some(review.into()),
        }
    }

    pub fn validate(self) -> DirectoryResult<ValidatedReview> {
        let mut problems = Vec::new();

        let resource_id = match self.resource_id.as_ref().map(resource_ref) {
            Some(Ok(id)) => Some(id),
            Some(Err(err)) => {
                problems.push(format!("resource_id: {}", err));
                None
            }
            None => {
                problems.push("resource_id is required".to_string());
                None
            }
        };

        let body = self.review.as_deref().map(normalize_whitespace).unwrap_or_default();
        if body.is_empty() {
            problems.push("review is required".to_string());
        } else if char_len(&body) > REVIEW_MAX {
            problems.push(format!("review must be at most {} characters", REVIEW_MAX));
        }

        match resource_id {
            Some(resource_id) if problems.is_empty() => Ok(ValidatedReview { resource_id, body }),
            _ => Err(DirectoryError::invalid(problems.join("; "))),
        }
    }
}

/// Accept a JSON integer or a string holding one.
fn resource_ref(value: &Value) -> Result<ResourceId, IdError> {
    match value {
        Value::Number(number) => match number.as_i64() {
            Some(raw) => ResourceId::new(raw),
            None => Err(IdError::NotAnInteger(number.to_string())),
        },
        Value::String(raw) => ResourceId::parse(raw),
        other => Err(IdError::NotAnInteger(other.to_string())),
    }
}
