// Common types and utilities shared across the application

pub mod app_state;
pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod pagination;
pub mod utils;

pub use app_state::{AppState, Identity};
pub use auth::{Actor, AuthError, Capability};
pub use entity_ids::*;
pub use error::{constraint_violation, ConstraintViolation, DirectoryError, DirectoryResult};
pub use pagination::{PaginationArgs, ValidatedPagination};
