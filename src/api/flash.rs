//! One-shot status messages carried to the next page in a cookie.
//!
//! The cookie holds a short ASCII code only; the text is looked up when the
//! next page renders and the cookie is removed in the same response.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::FLASH_COOKIE;
use crate::errors::{AppError, BlockReason, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    /// CSS class suffix used by the templates
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashMessage {
    LoggedIn,
    LoggedOut,
    InvalidCredentials,
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    CategoryCreated,
    CategoryUpdated,
    CategoryDeleted,
    FileUploaded,
    MissingField,
    InvalidPrice,
    UnknownCategory,
    DuplicateSlug,
    CategoryHasProducts,
    NoFile,
    DisallowedType,
    FileTooLarge,
    NotFound,
    Failure,
}

const ALL: [FlashMessage; 20] = [
    FlashMessage::LoggedIn,
    FlashMessage::LoggedOut,
    FlashMessage::InvalidCredentials,
    FlashMessage::ProductCreated,
    FlashMessage::ProductUpdated,
    FlashMessage::ProductDeleted,
    FlashMessage::CategoryCreated,
    FlashMessage::CategoryUpdated,
    FlashMessage::CategoryDeleted,
    FlashMessage::FileUploaded,
    FlashMessage::MissingField,
    FlashMessage::InvalidPrice,
    FlashMessage::UnknownCategory,
    FlashMessage::DuplicateSlug,
    FlashMessage::CategoryHasProducts,
    FlashMessage::NoFile,
    FlashMessage::DisallowedType,
    FlashMessage::FileTooLarge,
    FlashMessage::NotFound,
    FlashMessage::Failure,
];

impl FlashMessage {
    pub fn code(self) -> &'static str {
        match self {
            FlashMessage::LoggedIn => "logged-in",
            FlashMessage::LoggedOut => "logged-out",
            FlashMessage::InvalidCredentials => "invalid-credentials",
            FlashMessage::ProductCreated => "product-created",
            FlashMessage::ProductUpdated => "product-updated",
            FlashMessage::ProductDeleted => "product-deleted",
            FlashMessage::CategoryCreated => "category-created",
            FlashMessage::CategoryUpdated => "category-updated",
            FlashMessage::CategoryDeleted => "category-deleted",
            FlashMessage::FileUploaded => "file-uploaded",
            FlashMessage::MissingField => "missing-field",
            FlashMessage::InvalidPrice => "invalid-price",
            FlashMessage::UnknownCategory => "unknown-category",
            FlashMessage::DuplicateSlug => "duplicate-slug",
            FlashMessage::CategoryHasProducts => "category-has-products",
            FlashMessage::NoFile => "no-file",
            FlashMessage::DisallowedType => "disallowed-type",
            FlashMessage::FileTooLarge => "file-too-large",
            FlashMessage::NotFound => "not-found",
            FlashMessage::Failure => "failure",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ALL.into_iter().find(|message| message.code() == code)
    }

    pub fn text(self) -> &'static str {
        match self {
            FlashMessage::LoggedIn => "Login realizado com sucesso!",
            FlashMessage::LoggedOut => "Você saiu da área administrativa.",
            FlashMessage::InvalidCredentials => "Usuário ou senha inválidos.",
            FlashMessage::ProductCreated => "Produto adicionado com sucesso!",
            FlashMessage::ProductUpdated => "Produto atualizado com sucesso!",
            FlashMessage::ProductDeleted => "Produto excluído com sucesso!",
            FlashMessage::CategoryCreated => "Categoria adicionada com sucesso!",
            FlashMessage::CategoryUpdated => "Categoria atualizada com sucesso!",
            FlashMessage::CategoryDeleted => "Categoria excluída com sucesso!",
            FlashMessage::FileUploaded => "Arquivo enviado com sucesso",
            FlashMessage::MissingField => "Por favor, preencha todos os campos obrigatórios",
            FlashMessage::InvalidPrice => "Informe um preço válido.",
            FlashMessage::UnknownCategory => "Selecione uma categoria existente.",
            FlashMessage::DuplicateSlug => "Já existe uma categoria com este slug.",
            FlashMessage::CategoryHasProducts => {
                "Não é possível excluir esta categoria pois existem produtos associados a ela."
            }
            FlashMessage::NoFile => "Nenhum arquivo selecionado",
            FlashMessage::DisallowedType => "Tipo de arquivo não permitido",
            FlashMessage::FileTooLarge => "O arquivo excede o tamanho máximo permitido.",
            FlashMessage::NotFound => "Registro não encontrado.",
            FlashMessage::Failure => "Não foi possível concluir a operação. Tente novamente.",
        }
    }

    pub fn level(self) -> FlashLevel {
        match self {
            FlashMessage::LoggedIn
            | FlashMessage::ProductCreated
            | FlashMessage::ProductUpdated
            | FlashMessage::ProductDeleted
            | FlashMessage::CategoryCreated
            | FlashMessage::CategoryUpdated
            | FlashMessage::CategoryDeleted
            | FlashMessage::FileUploaded => FlashLevel::Success,
            FlashMessage::LoggedOut => FlashLevel::Info,
            _ => FlashLevel::Danger,
        }
    }

    /// Message shown for a failed admin operation.
    ///
    /// Infrastructure failures are logged here and reach the user as a
    /// generic failure.
    pub fn from_error(error: &AppError) -> Self {
        match error {
            AppError::Validation(e) => match e {
                ValidationError::MissingField(_) => FlashMessage::MissingField,
                ValidationError::InvalidPrice => FlashMessage::InvalidPrice,
                ValidationError::UnknownCategory => FlashMessage::UnknownCategory,
                ValidationError::NoFile => FlashMessage::NoFile,
                ValidationError::DisallowedType => FlashMessage::DisallowedType,
                ValidationError::FileTooLarge => FlashMessage::FileTooLarge,
                ValidationError::DuplicateSlug => FlashMessage::DuplicateSlug,
            },
            AppError::Blocked(BlockReason::HasDependentProducts) => {
                FlashMessage::CategoryHasProducts
            }
            AppError::NotFound => FlashMessage::NotFound,
            AppError::InvalidCredentials => FlashMessage::InvalidCredentials,
            other => {
                tracing::error!(error = ?other, "Admin operation failed");
                FlashMessage::Failure
            }
        }
    }
}

/// Queue a message for the next rendered page.
pub fn set(jar: CookieJar, message: FlashMessage) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, message.code()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Remove the pending message, returning it if it was valid.
pub fn take(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = FlashMessage::from_code(cookie.value());

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
