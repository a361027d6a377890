//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod public_handler;
pub mod upload_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use public_handler::public_routes;
pub use upload_handler::upload_routes;

use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;

use super::flash::{self, FlashMessage};
use crate::errors::{AppError, AppResult};

/// Finish a form post with a flash message and a redirect.
///
/// Success goes to `success_to` with `done`; any failure except a missing
/// session goes back to `failure_to` with the error's message.
pub(crate) fn redirect_with_flash<T>(
    jar: CookieJar,
    result: AppResult<T>,
    done: FlashMessage,
    success_to: &str,
    failure_to: &str,
) -> AppResult<(CookieJar, Redirect)> {
    match result {
        Ok(_) => Ok((flash::set(jar, done), Redirect::to(success_to))),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => Ok((
            flash::set(jar, FlashMessage::from_error(&e)),
            Redirect::to(failure_to),
        )),
    }
}
