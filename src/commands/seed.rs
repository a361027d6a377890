//! Seed command - Inserts the admin account and the sample catalog.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::Bootstrap;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;

    let report = Bootstrap::new(Arc::new(Persistence::new(db.get_connection())))
        .seed(&config.admin_username, config.admin_password())
        .await?;

    println!(
        "admin created: {}, categories created: {}, products created: {}",
        report.admin_created, report.categories_created, report.products_created
    );

    Ok(())
}
