//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod category_repository;
pub(crate) mod entities;
mod product_repository;
mod user_repository;

pub use category_repository::{CategoryRepository, CategoryStore, TxCategoryRepository};
pub use product_repository::{ProductRepository, ProductStore, TxProductRepository};
pub use user_repository::{TxUserRepository, UserRepository, UserStore};

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
