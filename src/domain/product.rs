//! Product entity and the commands that create or change one.

use serde::Deserialize;
use validator::Validate;

use super::input::{blank_to_none, empty_as_none, first_missing};
use super::Category;
use crate::errors::{AppError, AppResult, ValidationError};

/// A cake on the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i32,
    /// File name inside the upload directory; not checked against the disk
    pub image_filename: Option<String>,
}

/// Product joined with its category for the admin listing.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub product: Product,
    pub category: Option<Category>,
}

/// Raw product form as submitted by the admin area.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductInput {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required)]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required)]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image_filename: Option<String>,
}

struct ProductFields {
    name: String,
    description: Option<String>,
    price: f64,
    category_id: i32,
    image_filename: Option<String>,
}

impl ProductInput {
    fn into_fields(self) -> AppResult<ProductFields> {
        let input = Self {
            name: blank_to_none(self.name),
            description: blank_to_none(self.description),
            price: blank_to_none(self.price),
            category_id: blank_to_none(self.category_id),
            image_filename: blank_to_none(self.image_filename),
        };
        if let Err(errors) = input.validate() {
            return Err(first_missing(&errors, &["name", "price", "category_id"]).into());
        }

        let (Some(name), Some(price), Some(category_id)) =
            (input.name, input.price, input.category_id)
        else {
            return Err(AppError::internal("validated product input lost a field"));
        };

        Ok(ProductFields {
            name,
            description: input.description,
            price: parse_price(&price)?,
            category_id: parse_category_id(&category_id)?,
            image_filename: input.image_filename,
        })
    }
}

/// Parse a submitted price; it must be a finite, non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice),
    }
}

fn parse_category_id(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::UnknownCategory)
}

/// Insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i32,
    pub image_filename: Option<String>,
}

impl TryFrom<ProductInput> for CreateProduct {
    type Error = AppError;

    fn try_from(input: ProductInput) -> AppResult<Self> {
        let fields = input.into_fields()?;
        Ok(Self {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category_id: fields.category_id,
            image_filename: fields.image_filename,
        })
    }
}

/// What an update does with the stored image filename.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageChange {
    /// Leave the stored filename untouched
    Keep,
    Replace(String),
}

impl From<Option<String>> for ImageChange {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.is_empty() => ImageChange::Replace(name),
            _ => ImageChange::Keep,
        }
    }
}

/// Replace the editable fields of an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i32,
    pub image: ImageChange,
}

impl UpdateProduct {
    pub fn from_input(id: i32, input: ProductInput) -> AppResult<Self> {
        let fields = input.into_fields()?;
        Ok(Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category_id: fields.category_id,
            image: fields.image_filename.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: &str, category_id: &str) -> ProductInput {
        let field = |v: &str| Some(v.to_string()).filter(|s| !s.is_empty());
        ProductInput {
            name: field(name),
            description: None,
            price: field(price),
            category_id: field(category_id),
            image_filename: None,
        }
    }

    #[test]
    fn test_create_product_from_input() {
        let command = CreateProduct::try_from(input("Bolo de Fubá", "32.50", "1")).unwrap();
        assert_eq!(command.name, "Bolo de Fubá");
        assert_eq!(command.price, 32.5);
        assert_eq!(command.category_id, 1);
        assert_eq!(command.image_filename, None);
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let err = CreateProduct::try_from(input("", "", "")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField("name"))
        ));

        let err = CreateProduct::try_from(input("Bolo", "10", "")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField("category_id"))
        ));
    }

    #[test]
    fn test_invalid_price() {
        for raw in ["abc", "-1", "NaN", "inf"] {
            assert_eq!(parse_price(raw), Err(ValidationError::InvalidPrice), "{raw}");
        }
        assert_eq!(parse_price("0"), Ok(0.0));
        assert_eq!(parse_price(" 45.00 "), Ok(45.0));
    }

    #[test]
    fn test_non_numeric_category() {
        let err = CreateProduct::try_from(input("Bolo", "10", "bolos")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::UnknownCategory)
        ));
    }

    #[test]
    fn test_image_change() {
        assert_eq!(ImageChange::from(None), ImageChange::Keep);
        assert_eq!(ImageChange::from(Some(String::new())), ImageChange::Keep);
        assert_eq!(
            ImageChange::from(Some("bolo.png".to_string())),
            ImageChange::Replace("bolo.png".to_string())
        );

        let mut form = input("Bolo", "10", "2");
        form.image_filename = Some("novo.jpg".to_string());
        let command = UpdateProduct::from_input(7, form).unwrap();
        assert_eq!(command.id, 7);
        assert_eq!(command.image, ImageChange::Replace("novo.jpg".to_string()));
    }
}
