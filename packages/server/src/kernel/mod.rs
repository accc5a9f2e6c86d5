//! Kernel module - server infrastructure and dependencies.

pub mod database;
pub mod deps;
pub mod schema_guard;
pub mod traits;

pub use database::{connect, MIGRATOR};
pub use deps::ServerDeps;
pub use schema_guard::{
    is_missing_counter_column, CounterColumnState, GuardOutcome, SchemaGuard,
};
pub use traits::*;
