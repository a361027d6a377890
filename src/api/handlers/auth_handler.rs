//! Authentication handlers.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::api::extractors::{CurrentSession, SubmittedForm};
use crate::api::flash::{self, FlashMessage};
use crate::api::views::{render, Layout, LoginPage};
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::errors::{AppError, AppResult};

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout).post(logout))
}

/// Login form; an active session goes straight to the dashboard
pub async fn login_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> AppResult<Response> {
    if state.auth_service.current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/admin").into_response());
    }

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    Ok((jar, render(&LoginPage { layout })?).into_response())
}

/// Check credentials and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    SubmittedForm(form): SubmittedForm<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let session = match state.auth_service.login(&form.username, &form.password).await {
        Ok(session) => session,
        Err(AppError::InvalidCredentials) => {
            return Ok((
                flash::set(jar, FlashMessage::InvalidCredentials),
                Redirect::to("/auth/login"),
            ));
        }
        Err(e) => return Err(e),
    };

    let token = state.auth_service.encode_session(&session)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((
        flash::set(jar.add(cookie), FlashMessage::LoggedIn),
        Redirect::to("/admin"),
    ))
}

/// Drop the session cookie
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    state.auth_service.logout(&mut session);

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (flash::set(jar, FlashMessage::LoggedOut), Redirect::to("/"))
}
