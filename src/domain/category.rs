//! Category entity and the commands that create or change one.

use serde::Deserialize;
use validator::Validate;

use super::input::{blank_to_none, empty_as_none, first_missing};
use crate::errors::{AppError, AppResult};

/// A menu section such as "Bolos Simples".
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    /// URL-safe unique identifier used in `/categoria/<slug>`
    pub slug: String,
    pub description: Option<String>,
}

/// Raw category form as submitted by the admin area.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryInput {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
}

impl CategoryInput {
    /// Check required fields and return `(name, slug, description)`.
    fn into_parts(self) -> AppResult<(String, String, Option<String>)> {
        let input = Self {
            name: blank_to_none(self.name),
            slug: blank_to_none(self.slug),
            description: blank_to_none(self.description),
        };
        if let Err(errors) = input.validate() {
            return Err(first_missing(&errors, &["name", "slug"]).into());
        }

        match (input.name, input.slug) {
            (Some(name), Some(slug)) => Ok((name, slug, input.description)),
            _ => Err(AppError::internal("validated category input lost a field")),
        }
    }
}

/// Insert a new category.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl TryFrom<CategoryInput> for CreateCategory {
    type Error = AppError;

    fn try_from(input: CategoryInput) -> AppResult<Self> {
        let (name, slug, description) = input.into_parts()?;
        Ok(Self {
            name,
            slug,
            description,
        })
    }
}

/// Replace every editable field of an existing category.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategory {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn from_input(id: i32, input: CategoryInput) -> AppResult<Self> {
        let (name, slug, description) = input.into_parts()?;
        Ok(Self {
            id,
            name,
            slug,
            description,
        })
    }
}
