//! Argon2id password hashing.
//!
//! Accounts created before the switch to Argon2id still hold bcrypt hashes
//! (`$2a$`, `$2b$`, `$2y$`). Those verify as before; new hashes are always
//! Argon2id.

use anyhow::{anyhow, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::kernel::BasePasswordHasher;

/// Hashes passwords into PHC strings (`$argon2id$v=19$...`).
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Minimum-cost hasher. Only for tests, where default costs dominate runtime.
    pub fn fast_insecure() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .unwrap_or_default();
        Self::with_params(params)
    }
}

impl BasePasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        if is_bcrypt_hash(password_hash) {
            return bcrypt::verify(password, password_hash)
                .map_err(|e| anyhow!("Failed to verify legacy password hash: {}", e));
        }

        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| anyhow!("Stored password hash is malformed: {}", e))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow!("Failed to verify password: {}", e)),
        }
    }
}

fn is_bcrypt_hash(password_hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"]
        .iter()
        .any(|prefix| password_hash.starts_with(prefix))
}
