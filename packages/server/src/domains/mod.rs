// Business domains
pub mod accounts;
pub mod resources;
pub mod reviews;
