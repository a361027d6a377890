//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Migrate, seed and start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Insert the admin account and sample catalog

pub mod args;

pub use args::{Cli, Commands};
