//! Request session passed explicitly into every admin operation.

/// Identity carried by the signed session cookie.
///
/// An anonymous session has no user id. Holding a `Session` with a user id
/// does not prove the user still exists; services re-check through
/// `AuthService::require_authenticated`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<i32>,
}

impl Session {
    /// Session for a visitor who has not logged in.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Session identifying a logged-in user.
    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        self.user_id
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Drop the identity; used on logout.
    pub fn clear(&mut self) {
        self.user_id = None;
    }
}
