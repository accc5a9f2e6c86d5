//! Request and response payloads for the account endpoints

use serde::{Deserialize, Serialize};

use crate::common::utils::char_len;
use crate::common::{DirectoryError, DirectoryResult, UserId};
use crate::domains::accounts::models::User;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 32;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: UserId,
    pub username: String,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: UserData,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Username and password that passed validation
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl SignupInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Usernames are trimmed but otherwise kept verbatim; they are case-sensitive.
    pub fn validate(self) -> DirectoryResult<Credentials> {
        let username = self.username.unwrap_or_default().trim().to_string();
        let password = self.password.unwrap_or_default();

        let mut problems = Vec::new();
        let username_len = char_len(&username);
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&username_len) {
            problems.push(format!(
                "username must be {}-{} characters",
                USERNAME_MIN, USERNAME_MAX
            ));
        }
        let password_len = char_len(&password);
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&password_len) {
            problems.push(format!(
                "password must be {}-{} characters",
                PASSWORD_MIN, PASSWORD_MAX
            ));
        }

        if !problems.is_empty() {
            return Err(DirectoryError::invalid(problems.join("; ")));
        }

        Ok(Credentials { username, password })
    }
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Only presence is checked; bounds are a signup concern.
    pub fn validate(self) -> DirectoryResult<Credentials> {
        match (self.username, self.password) {
            (Some(username), Some(password))
                if !username.trim().is_empty() && !password.is_empty() =>
            {
                Ok(Credentials {
                    username: username.trim().to_string(),
                    password,
                })
            }
            _ => Err(DirectoryError::invalid("username and password required")),
        }
    }
}
