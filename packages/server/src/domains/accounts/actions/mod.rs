//! Account actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers.

mod current_user;
mod login;
mod signup;

pub use current_user::current_user;
pub use login::login;
pub use signup::signup;
