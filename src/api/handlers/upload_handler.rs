//! Image upload handlers.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;

use super::redirect_with_flash;
use crate::api::extractors::CurrentSession;
use crate::api::flash::{self, FlashMessage};
use crate::api::views::{render, Layout, UploadPage};
use crate::api::AppState;
use crate::errors::{AppError, AppResult, ValidationError};

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Create upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/admin/upload", get(upload_page).post(upload))
}

/// Upload form and the files already stored
pub async fn upload_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let files = state.upload_service.list_uploaded(&session).await?;

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    Ok((jar, render(&UploadPage::new(layout, files))?))
}

pub async fn upload(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<(CookieJar, Redirect)> {
    let result = match read_file_field(multipart).await {
        Ok((filename, bytes)) => state.upload_service.upload(&session, &filename, &bytes).await,
        Err(e) => Err(e),
    };

    redirect_with_flash(
        jar,
        result,
        FlashMessage::FileUploaded,
        "/admin/upload",
        "/admin/upload",
    )
}

/// Filename and content of the `file` field; empty when the field is absent.
async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, bytes));
    }

    Ok((String::new(), Bytes::new()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::FileTooLarge.into()
    } else {
        AppError::bad_request(e.body_text())
    }
}
