// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BasePasswordHasher)

use anyhow::Result;

// =============================================================================
// Password Hashing Trait (Infrastructure)
// =============================================================================

pub trait BasePasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed hashes.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}
