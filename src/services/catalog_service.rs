//! Catalog service - Read-only queries behind the public pages.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Category, Product};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Public catalog queries. Nothing here writes.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// First `limit` products in store order
    async fn list_featured(&self, limit: u64) -> AppResult<Vec<Product>>;

    /// All categories
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Category for a `/categoria/<slug>` page; `NotFound` if unknown
    async fn get_category_by_slug(&self, slug: &str) -> AppResult<Category>;

    /// Products of one category
    async fn list_products_in_category(&self, category_id: i32) -> AppResult<Vec<Product>>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn list_featured(&self, limit: u64) -> AppResult<Vec<Product>> {
        self.uow.products().list(Some(limit)).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.uow.categories().list().await
    }

    async fn get_category_by_slug(&self, slug: &str) -> AppResult<Category> {
        self.uow
            .categories()
            .find_by_slug(slug)
            .await?
            .ok_or_not_found()
    }

    async fn list_products_in_category(&self, category_id: i32) -> AppResult<Vec<Product>> {
        self.uow.products().list_by_category(category_id).await
    }
}
