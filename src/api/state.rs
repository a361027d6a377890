//! Shared state handed to every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AdminService, AuthService, CatalogService, ServiceContainer, Services, UploadService,
};

#[derive(Clone)]
pub struct AppState {
    /// Login and session tokens
    pub auth_service: Arc<dyn AuthService>,
    /// Public catalog queries
    pub catalog_service: Arc<dyn CatalogService>,
    /// Admin CRUD
    pub admin_service: Arc<dyn AdminService>,
    /// Image uploads
    pub upload_service: Arc<dyn UploadService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            catalog_service: container.catalog(),
            admin_service: container.admin(),
            upload_service: container.uploads(),
            database,
        }
    }
}
