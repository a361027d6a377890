//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod product;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use category::{ActiveModel as CategoryActiveModel, Entity as CategoryEntity, Model as CategoryModel};
#[allow(unused_imports)]
pub use product::{ActiveModel as ProductActiveModel, Entity as ProductEntity, Model as ProductModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
