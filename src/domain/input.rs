//! Helpers shared by the HTML form inputs.

use serde::{Deserialize, Deserializer};
use validator::ValidationErrors;

use crate::errors::ValidationError;

/// Deserialize a form field, treating blank values like absent ones.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(blank_to_none)
}

/// Trim a field; whitespace-only counts as absent.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Report the first missing field, checking in form order.
pub(crate) fn first_missing(
    errors: &ValidationErrors,
    fields: &[&'static str],
) -> ValidationError {
    let field_errors = errors.field_errors();
    let field = fields
        .iter()
        .copied()
        .find(|f| field_errors.contains_key(*f))
        .unwrap_or(fields[0]);
    ValidationError::MissingField(field)
}
