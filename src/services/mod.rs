//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. Handlers depend on
//! the service traits only; the implementations are generic over the Unit of
//! Work so they can run against the database or against mocks.

mod admin_service;
mod auth_service;
pub mod bootstrap;
mod catalog_service;
pub mod container;
mod upload_service;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminManager, AdminService};
pub use auth_service::{AuthService, Authenticator, Claims};
pub use bootstrap::{Bootstrap, SeedReport};
pub use catalog_service::{Catalog, CatalogService};
pub use upload_service::{has_allowed_extension, sanitize_filename, UploadService, Uploads};
