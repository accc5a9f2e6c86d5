pub mod resource;

pub use resource::{Category, Resource};
