//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, migrations and repositories
//! - The upload directory
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;
pub mod uploads;

pub use db::{Database, MigrationState, Migrator};
pub use repositories::{CategoryRepository, ProductRepository, UserRepository};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};
pub use uploads::UploadDir;
