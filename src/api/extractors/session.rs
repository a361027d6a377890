//! Session extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::Session;

/// Session decoded from the session cookie.
///
/// A missing, expired or forged cookie yields an anonymous session; it never
/// rejects the request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = jar
            .get(SESSION_COOKIE)
            .map(|cookie| state.auth_service.decode_session(cookie.value()))
            .unwrap_or_default();

        Ok(CurrentSession(session))
    }
}
