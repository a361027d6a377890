//! Error types shared by every layer, and how they render as pages.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::config::SITE_NAME;

/// Reasons a submitted form or file is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("price must be a non-negative number")]
    InvalidPrice,

    #[error("category does not exist")]
    UnknownCategory,

    #[error("no file selected")]
    NoFile,

    #[error("file type not allowed")]
    DisallowedType,

    #[error("file exceeds the upload size limit")]
    FileTooLarge,

    #[error("slug already in use")]
    DuplicateSlug,
}

/// Why a delete was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    #[error("category still has products")]
    HasDependentProducts,
}

/// Everything a service or handler can fail with
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Operation blocked: {0}")]
    Blocked(BlockReason),

    // Validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session error")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("File system error")]
    Io(#[from] std::io::Error),

    #[error("Template error")]
    Render(#[from] askama::Error),

    // Internal
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Session(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Blocked(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Io(_)
            | AppError::Render(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown on the error page. Infrastructure failures are logged here
    /// and replaced by a generic message.
    fn user_message(&self) -> String {
        match self {
            AppError::NotFound => "Página não encontrada".to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::BadRequest(msg) => msg.clone(),

            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database failure");
                "Ocorreu um erro no banco de dados".to_string()
            }
            AppError::Session(e) => {
                tracing::error!(error = ?e, "Session token failure");
                "Sessão inválida ou expirada".to_string()
            }
            AppError::Io(e) => {
                tracing::error!(error = ?e, "File system failure");
                "Ocorreu um erro interno".to_string()
            }
            AppError::Render(e) => {
                tracing::error!(error = ?e, "Template rendering failure");
                "Ocorreu um erro interno".to_string()
            }
            AppError::Config(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal failure");
                "Ocorreu um erro interno".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Unauthorized) {
            return Redirect::to("/auth/login").into_response();
        }

        let status = self.status();
        let page = ErrorPage {
            site_name: SITE_NAME,
            code: status.as_u16(),
            message: self.user_message(),
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = ?e, "Error page rendering failure");
                status.into_response()
            }
        }
    }
}

/// Standalone page for errors; it needs no database access.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    site_name: &'static str,
    code: u16,
    message: String,
}

pub type AppResult<T> = Result<T, AppError>;

/// `None` as `AppError::NotFound`
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    /// True when the store rejected a write because of a unique index.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            AppError::Database(e)
                if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_)))
        )
    }

    /// Report a unique-index rejection on `categories.slug` as `DuplicateSlug`;
    /// other errors pass through.
    pub fn slug_conflict(self) -> Self {
        if self.is_unique_violation() {
            ValidationError::DuplicateSlug.into()
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/auth/login");
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::from(ValidationError::InvalidPrice).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_error_page_escapes_message() {
        let response = AppError::bad_request("<script>alert(1)</script>").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("alert(1)"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn test_slug_conflict_passes_other_errors_through() {
        assert!(matches!(
            AppError::NotFound.slug_conflict(),
            AppError::NotFound
        ));
        assert!(!AppError::internal("boom").is_unique_violation());
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}
