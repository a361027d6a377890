//! Argon2 hashes for admin account passwords.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// PHC-format Argon2 hash as stored in `users.password_hash`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash a new password with a random salt.
    ///
    /// Admin passwords only come from configuration, so a short one is a
    /// configuration error.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Config(format!(
                "ADMIN_PASSWORD must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Check a login attempt. A stored value that is not a PHC string never
    /// matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }
}
