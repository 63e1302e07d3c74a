//! Password hashing for user accounts
//!
//! Bcrypt with the library default cost. Hashes are stored in the users
//! table and never leave the service.

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a login attempt against the stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        // minimum cost keeps the test fast
        let hashed = bcrypt::hash("s3cret-pw", 4).unwrap();
        assert!(verify_password("s3cret-pw", &hashed).unwrap());
        assert!(!verify_password("wrong-pw", &hashed).unwrap());
    }
}
