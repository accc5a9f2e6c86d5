// Healthcare Resource Directory - API Core
//
// Backend for a directory of healthcare resources: region search,
// submissions, recommendations and reviews.
//
// Business logic is organized per-domain in domains/*/actions/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
