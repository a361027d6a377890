//! Delícias da Fa - Bakery storefront with an admin area
//!
//! Public pages list the cakes by category; a logged-in administrator
//! manages products, categories and product images.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Catalog entities, sessions and form commands
//! - **services**: Catalog, admin, upload and auth use cases
//! - **infra**: Database, repositories, Unit of Work and upload storage
//! - **api**: Handlers, templates, middleware and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Migrate, seed and start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Insert the admin account and sample catalog
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Category, Password, Product, Session, User};
pub use errors::{AppError, AppResult};
