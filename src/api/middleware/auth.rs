//! Login guard for the admin area.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::CurrentSession;
use crate::api::AppState;
use crate::errors::AppError;

/// Session authentication middleware.
///
/// Requests without a session for an existing user are answered with
/// `Unauthorized`, which renders as a redirect to the login page. The
/// resolved user is stored in the request extensions.
pub async fn require_login(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state
        .auth_service
        .current_user(&session)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(user_id = user.id, path = %request.uri().path(), "Admin request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
