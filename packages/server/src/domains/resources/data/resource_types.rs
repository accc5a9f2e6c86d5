//! Request and response payloads for the resource catalog

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::utils::{char_len, normalize_whitespace};
use crate::common::{DirectoryError, DirectoryResult};
use crate::domains::resources::models::{Category, Resource};
use crate::domains::reviews::data::ReviewData;

pub const NAME_LEN: (usize, usize) = (2, 120);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 1000);
pub const REGION_LEN: (usize, usize) = (2, 80);
pub const COUNTRY_LEN: (usize, usize) = (2, 80);

/// Fields submitted to create a resource
///
/// Every field is optional on the wire so a missing one is reported as
/// invalid input alongside any other problem, not as a decode failure.
#[derive(Debug, Clone, Default, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CreateResourceInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub region: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// A resource submission that passed validation, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResource {
    pub name: String,
    pub category: Category,
    pub country: String,
    pub description: String,
    pub region: String,
    pub lat: f64,
    pub lon: f64,
}

impl CreateResourceInput {
    /// Normalize whitespace on every text field, then check all rules.
    ///
    /// All problems are reported together, separated by `; `.
    pub fn validate(self) -> DirectoryResult<ValidatedResource> {
        let mut problems = Vec::new();

        let name = text_field("name", self.name, NAME_LEN, &mut problems);
        let description = text_field("description", self.description, DESCRIPTION_LEN, &mut problems);
        let region = text_field("region", self.region, REGION_LEN, &mut problems);
        let country = text_field("country", self.country, COUNTRY_LEN, &mut problems);

        let category = match self.category.as_deref().map(normalize_whitespace) {
            Some(label) if !label.is_empty() => match label.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    problems.push(format!("category must be one of: {}", category_labels()));
                    None
                }
            },
            _ => {
                problems.push("category is required".to_string());
                None
            }
        };

        let lat = coordinate("lat", self.lat, 90.0, &mut problems);
        let lon = coordinate("lon", self.lon, 180.0, &mut problems);

        match (category, lat, lon) {
            (Some(category), Some(lat), Some(lon)) if problems.is_empty() => {
                Ok(ValidatedResource {
                    name,
                    category,
                    country,
                    description,
                    region,
                    lat,
                    lon,
                })
            }
            _ => Err(DirectoryError::invalid(problems.join("; "))),
        }
    }
}

fn text_field(
    field: &str,
    value: Option<String>,
    (min, max): (usize, usize),
    problems: &mut Vec<String>,
) -> String {
    let normalized = value.as_deref().map(normalize_whitespace).unwrap_or_default();
    if normalized.is_empty() {
        problems.push(format!("{} is required", field));
    } else if !(min..=max).contains(&char_len(&normalized)) {
        problems.push(format!("{} must be {}-{} characters", field, min, max));
    }
    normalized
}

fn coordinate(field: &str, value: Option<f64>, bound: f64, problems: &mut Vec<String>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && (-bound..=bound).contains(&v) => Some(v),
        Some(_) => {
            problems.push(format!("{} must be between {} and {}", field, -bound, bound));
            None
        }
        None => {
            problems.push(format!("{} is required", field));
            None
        }
    }
}

fn category_labels() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A resource as listed by search: the row plus its reviews, newest first
#[derive(Debug, Clone, Serialize)]
pub struct ResourceData {
    #[serde(flatten)]
    pub resource: Resource,
    pub review_count: usize,
    pub reviews: Vec<ReviewData>,
}

impl ResourceData {
    pub fn new(resource: Resource, reviews: Vec<ReviewData>) -> Self {
        Self {
            resource,
            review_count: reviews.len(),
            reviews,
        }
    }
}

impl From<Resource> for ResourceData {
    fn from(resource: Resource) -> Self {
        Self::new(resource, Vec::new())
    }
}
