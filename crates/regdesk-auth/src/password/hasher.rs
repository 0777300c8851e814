//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use regdesk_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Holds a pre-computed dummy hash so that lookups of unknown identifiers
/// can still pay the cost of a verification, keeping the failure latency of
/// "unknown user" and "wrong password" comparable.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        let salt = SaltString::generate(&mut OsRng);
        // Failure here means the argon2 defaults themselves are broken;
        // there is no meaningful recovery at construction time.
        let dummy_hash = Argon2::default()
            .hash_password(b"regdesk-dummy-credential", &salt)
            .map(|h| h.to_string())
            .unwrap_or_default();
        Self { dummy_hash }
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    /// The underlying comparison is constant-time.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        let argon2 = Argon2::default();
        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Runs a verification against the dummy hash and discards the result.
    ///
    /// Called on the unknown-identifier path of authentication so both
    /// failure modes perform one Argon2 verification.
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify_password(password, &self.dummy_hash);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
