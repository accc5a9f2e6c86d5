//! Account request/response types

pub mod user_types;

pub use user_types::*;
