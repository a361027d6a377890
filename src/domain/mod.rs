//! Domain layer - Core business entities and logic
//!
//! Entities of the bakery catalog, the sessions that guard the admin area,
//! and the command objects built from submitted forms.

pub mod category;
mod input;
pub mod password;
pub mod product;
pub mod session;
pub mod user;

pub use category::{Category, CategoryInput, CreateCategory, UpdateCategory};
pub use password::Password;
pub use product::{CreateProduct, ImageChange, Product, ProductInput, ProductListing, UpdateProduct};
pub use session::Session;
pub use user::{CreateUser, User};

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub product_count: u64,
    pub category_count: u64,
}

/// File written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Sanitized name the file was stored under
    pub filename: String,
    pub size: usize,
}
