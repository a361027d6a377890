//! Admin user entity.

use super::Password;

/// A known user allowed into the admin area.
///
/// There are no roles: every stored user has full admin access.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Check a plain-text password against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }
}

/// Data needed to insert a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: Password,
}
