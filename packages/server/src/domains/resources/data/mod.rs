//! Resource catalog payloads

pub mod resource_types;

pub use resource_types::{CreateResourceInput, ResourceData, ValidatedResource};
