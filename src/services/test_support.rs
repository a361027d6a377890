//! Unit of Work double backed by mockall repositories.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    MockCategoryRepository, MockProductRepository, MockUserRepository,
};
use crate::infra::{
    CategoryRepository, ProductRepository, TransactionContext, TxFuture, UnitOfWork,
    UserRepository,
};

/// Mocks without expectations panic when called, which makes this double
/// useful to prove that a code path never touches the store.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            categories: Arc::new(MockCategoryRepository::new()),
            products: Arc::new(MockProductRepository::new()),
        }
    }
}

impl TestUnitOfWork {
    pub fn with_users(mut self, users: MockUserRepository) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn with_categories(mut self, categories: MockCategoryRepository) -> Self {
        self.categories = Arc::new(categories);
        self
    }

    pub fn with_products(mut self, products: MockProductRepository) -> Self {
        self.products = Arc::new(products);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
