//! Service Container - Centralized service access.
//!
//! Handlers only see the service traits; the container wires the concrete
//! implementations around one shared Unit of Work.

use std::sync::Arc;

use super::{AdminService, AuthService, CatalogService, UploadService};
use crate::config::Config;
use crate::infra::{Persistence, UploadDir};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get public catalog service
    fn catalog(&self) -> Arc<dyn CatalogService>;

    /// Get admin CRUD service
    fn admin(&self) -> Arc<dyn AdminService>;

    /// Get image upload service
    fn uploads(&self) -> Arc<dyn UploadService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    catalog_service: Arc<dyn CatalogService>,
    admin_service: Arc<dyn AdminService>,
    upload_service: Arc<dyn UploadService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        catalog_service: Arc<dyn CatalogService>,
        admin_service: Arc<dyn AdminService>,
        upload_service: Arc<dyn UploadService>,
    ) -> Self {
        Self {
            auth_service,
            catalog_service,
            admin_service,
            upload_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{AdminManager, Authenticator, Catalog, Uploads};

        let uploads_dir = UploadDir::new(config.upload_dir.clone());
        let max_upload_bytes = config.max_upload_bytes;

        let uow = Arc::new(Persistence::new(db));
        let auth_service: Arc<dyn AuthService> = Arc::new(Authenticator::new(uow.clone(), config));
        let catalog_service = Arc::new(Catalog::new(uow.clone()));
        let admin_service = Arc::new(AdminManager::new(uow, auth_service.clone()));
        let upload_service = Arc::new(Uploads::new(
            uploads_dir,
            max_upload_bytes,
            auth_service.clone(),
        ));

        Self::new(auth_service, catalog_service, admin_service, upload_service)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }

    fn uploads(&self) -> Arc<dyn UploadService> {
        self.upload_service.clone()
    }
}
