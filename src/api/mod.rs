//! API layer - HTTP handlers and middleware
//!
//! This module contains all HTTP-related concerns:
//! - Page and form handlers
//! - The login guard for the admin area
//! - Session and form extractors
//! - Flash messages and Askama page models
//! - Route definitions

pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
