//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-step writes (pre-check then
//! write) inside one database transaction.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::repositories::{
    CategoryRepository, CategoryStore, ProductRepository, ProductStore, TxCategoryRepository,
    TxProductRepository, TxUserRepository, UserRepository, UserStore,
};
use crate::errors::AppResult;

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Repository access for the services.
///
/// Generic `transaction` keeps this trait out of `dyn`; services take it as a
/// type parameter.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn categories(&self) -> Arc<dyn CategoryRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    /// Run `f` in one transaction: commit on `Ok`, roll back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repositories bound to an open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'a> {
        TxUserRepository::new(self.txn)
    }

    pub fn categories(&self) -> TxCategoryRepository<'a> {
        TxCategoryRepository::new(self.txn)
    }

    pub fn products(&self) -> TxProductRepository<'a> {
        TxProductRepository::new(self.txn)
    }
}

/// SeaORM-backed repositories sharing one connection pool
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    category_repo: Arc<CategoryStore>,
    product_repo: Arc<ProductStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            category_repo: Arc::new(CategoryStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.db.begin().await?;

        let outcome = f(TransactionContext::new(&txn)).await;
        if outcome.is_ok() {
            txn.commit().await?;
        } else if let Err(e) = txn.rollback().await {
            tracing::error!(error = %e, "Rollback failed");
        }
        outcome
    }
}

/// Run a block inside `UnitOfWork::transaction` without spelling out the
/// boxing.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
