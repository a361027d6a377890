//! Form extractor whose rejection goes through `AppError`.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// URL-encoded form body.
///
/// Field validation happens when the form is converted into a domain
/// command; this extractor only reports bodies that cannot be decoded.
pub struct SubmittedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for SubmittedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(SubmittedForm(value))
    }
}
