//! Shared setup for the integration tests: a migrated, seeded SQLite file
//! in a temporary directory.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use delicias::config::Config;
use delicias::domain::Session;
use delicias::infra::{Database, Persistence};
use delicias::services::{Bootstrap, ServiceContainer, Services};

pub const SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestContext {
    pub services: Services,
    pub database: Arc<Database>,
    pub config: Config,
    pub bootstrap: Bootstrap<Persistence>,
    // Dropped last; removes the database file and uploads
    pub dir: TempDir,
}

impl TestContext {
    /// Fresh database with migrations applied and seed data inserted.
    pub async fn seeded() -> Self {
        let ctx = Self::empty().await;
        ctx.bootstrap
            .seed(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("seed");
        ctx
    }

    /// Fresh database with migrations applied and no rows.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

        let database = Arc::new(Database::connect(&url).await.expect("connect"));
        let config = Config::new(url, SECRET)
            .expect("config")
            .with_upload_dir(dir.path().join("uploads"));

        let services = Services::from_connection(database.get_connection(), config.clone());
        let bootstrap = Bootstrap::new(Arc::new(Persistence::new(database.get_connection())));

        Self {
            services,
            database,
            config,
            bootstrap,
            dir,
        }
    }

    /// Session of the seeded administrator.
    pub async fn admin_session(&self) -> Session {
        self.services
            .auth()
            .login(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("admin login")
    }

    /// True when the admin area can still load the product.
    pub async fn product_exists(&self, id: i32) -> bool {
        let session = self.admin_session().await;
        self.services.admin().get_product(&session, id).await.is_ok()
    }
}
