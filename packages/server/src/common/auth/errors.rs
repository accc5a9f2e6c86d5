use thiserror::Error;

/// Authorization errors for the directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid username or password")]
    InvalidCredentials,
}
