//! Authentication service - Credential checks and signed sessions.
//!
//! A session travels as an HS256 token whose only identity claim is the
//! user id. Nothing is stored server side, so logout only has to drop the
//! cookie.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{Password, Session, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Hash verified when the username is unknown, so both login failures take
/// the same time.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("dummy-password-never-matches")
        .map(Password::into_string)
        .unwrap_or_default()
});

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and open a session for the user
    async fn login(&self, username: &str, password: &str) -> AppResult<Session>;

    /// Make the session anonymous
    fn logout(&self, session: &mut Session);

    /// Resolve the session to a stored user, if any
    async fn current_user(&self, session: &Session) -> AppResult<Option<User>>;

    /// Guard for admin operations; fails with `Unauthorized`
    async fn require_authenticated(&self, session: &Session) -> AppResult<User>;

    /// Sign the session into a cookie token
    fn encode_session(&self, session: &Session) -> AppResult<String>;

    /// Read a cookie token; anything invalid yields an anonymous session
    fn decode_session(&self, token: &str) -> Session;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let user = self.uow.users().find_by_username(username).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => DUMMY_HASH.clone(),
        };
        let password_valid = Password::from_hash(hash).verify(password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = user.id, "User logged in");
                Ok(Session::for_user(user.id))
            }
            _ => {
                tracing::warn!(username = %username, "Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn logout(&self, session: &mut Session) {
        if let Some(user_id) = session.user_id() {
            tracing::info!(user_id, "User logged out");
        }
        session.clear();
    }

    async fn current_user(&self, session: &Session) -> AppResult<Option<User>> {
        match session.user_id() {
            Some(id) => self.uow.users().find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn require_authenticated(&self, session: &Session) -> AppResult<User> {
        self.current_user(session)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    fn encode_session(&self, session: &Session) -> AppResult<String> {
        let user_id = session.user_id().ok_or(AppError::Unauthorized)?;
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::hours(self.config.session_expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.session_secret_bytes()),
        )?)
    }

    fn decode_session(&self, token: &str) -> Session {
        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret_bytes()),
            &Validation::default(),
        ) {
            Ok(data) => Session::for_user(data.claims.sub),
            Err(e) => {
                tracing::debug!(error = %e, "Discarding invalid session token");
                Session::anonymous()
            }
        }
    }
}
