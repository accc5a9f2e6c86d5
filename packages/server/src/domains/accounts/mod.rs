//! Accounts domain - signup, login and token issuance
//!
//! Responsibilities:
//! - Username/password accounts with Argon2id hashes
//! - JWT issuance and verification (identity resolution for the HTTP layer)
//!
//! The catalog and review actions never look at credentials; they only see the
//! `Identity` this domain resolves.

pub mod actions;
pub mod data;
pub mod jwt;
pub mod models;
pub mod password;

pub use data::{AuthPayload, LoginInput, SignupInput, UserData};
pub use jwt::{Claims, JwtService};
pub use models::User;
pub use password::Argon2PasswordHasher;
