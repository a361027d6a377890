//! Admin management service - Product and category CRUD.
//!
//! Every operation takes the caller's session and checks it before doing
//! anything else. Writes run in a transaction together with their
//! pre-checks (category exists, slug free, no dependent products).

use async_trait::async_trait;
use std::sync::Arc;

use super::AuthService;
use crate::domain::{
    Category, CategoryInput, CreateCategory, CreateProduct, DashboardStats, Product,
    ProductInput, ProductListing, Session, UpdateCategory, UpdateProduct,
};
use crate::errors::{AppError, AppResult, BlockReason, OptionExt, ValidationError};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

/// Admin operations over the catalog.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Product and category counts for the dashboard
    async fn dashboard(&self, session: &Session) -> AppResult<DashboardStats>;

    /// All products with their category
    async fn list_products(&self, session: &Session) -> AppResult<Vec<ProductListing>>;

    async fn get_product(&self, session: &Session, id: i32) -> AppResult<Product>;

    async fn create_product(&self, session: &Session, input: ProductInput) -> AppResult<Product>;

    /// Replace a product's fields; a blank image filename keeps the stored one
    async fn update_product(
        &self,
        session: &Session,
        id: i32,
        input: ProductInput,
    ) -> AppResult<Product>;

    async fn delete_product(&self, session: &Session, id: i32) -> AppResult<()>;

    async fn list_categories(&self, session: &Session) -> AppResult<Vec<Category>>;

    async fn get_category(&self, session: &Session, id: i32) -> AppResult<Category>;

    async fn create_category(&self, session: &Session, input: CategoryInput)
        -> AppResult<Category>;

    async fn update_category(
        &self,
        session: &Session,
        id: i32,
        input: CategoryInput,
    ) -> AppResult<Category>;

    /// Delete a category; `Blocked` while products still reference it
    async fn delete_category(&self, session: &Session, id: i32) -> AppResult<()>;
}

/// Concrete implementation of AdminService using Unit of Work.
pub struct AdminManager<U: UnitOfWork> {
    uow: Arc<U>,
    auth: Arc<dyn AuthService>,
}

impl<U: UnitOfWork> AdminManager<U> {
    pub fn new(uow: Arc<U>, auth: Arc<dyn AuthService>) -> Self {
        Self { uow, auth }
    }
}

async fn ensure_category_exists(ctx: &TransactionContext<'_>, category_id: i32) -> AppResult<()> {
    ctx.categories()
        .find_by_id(category_id)
        .await?
        .ok_or(ValidationError::UnknownCategory)?;
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminManager<U> {
    async fn dashboard(&self, session: &Session) -> AppResult<DashboardStats> {
        self.auth.require_authenticated(session).await?;

        let products = self.uow.products();
        let categories = self.uow.categories();
        let (product_count, category_count) =
            tokio::try_join!(products.count(), categories.count())?;

        Ok(DashboardStats {
            product_count,
            category_count,
        })
    }

    async fn list_products(&self, session: &Session) -> AppResult<Vec<ProductListing>> {
        self.auth.require_authenticated(session).await?;
        self.uow.products().list_with_category().await
    }

    async fn get_product(&self, session: &Session, id: i32) -> AppResult<Product> {
        self.auth.require_authenticated(session).await?;
        self.uow.products().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_product(&self, session: &Session, input: ProductInput) -> AppResult<Product> {
        let user = self.auth.require_authenticated(session).await?;
        let command = CreateProduct::try_from(input)?;

        let product = with_transaction!(self.uow, |ctx| {
            ensure_category_exists(&ctx, command.category_id).await?;
            ctx.products().create(command).await
        })?;

        tracing::info!(product_id = product.id, user_id = user.id, "Product created");
        Ok(product)
    }

    async fn update_product(
        &self,
        session: &Session,
        id: i32,
        input: ProductInput,
    ) -> AppResult<Product> {
        let user = self.auth.require_authenticated(session).await?;
        let command = UpdateProduct::from_input(id, input)?;

        let product = with_transaction!(self.uow, |ctx| {
            ctx.products().find_by_id(command.id).await?.ok_or_not_found()?;
            ensure_category_exists(&ctx, command.category_id).await?;
            ctx.products().update(command).await
        })?;

        tracing::info!(product_id = product.id, user_id = user.id, "Product updated");
        Ok(product)
    }

    async fn delete_product(&self, session: &Session, id: i32) -> AppResult<()> {
        let user = self.auth.require_authenticated(session).await?;

        with_transaction!(self.uow, |ctx| ctx.products().delete(id).await)?;

        tracing::info!(product_id = id, user_id = user.id, "Product deleted");
        Ok(())
    }

    async fn list_categories(&self, session: &Session) -> AppResult<Vec<Category>> {
        self.auth.require_authenticated(session).await?;
        self.uow.categories().list().await
    }

    async fn get_category(&self, session: &Session, id: i32) -> AppResult<Category> {
        self.auth.require_authenticated(session).await?;
        self.uow.categories().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_category(
        &self,
        session: &Session,
        input: CategoryInput,
    ) -> AppResult<Category> {
        let user = self.auth.require_authenticated(session).await?;
        let command = CreateCategory::try_from(input)?;

        let category = with_transaction!(self.uow, |ctx| {
            if ctx.categories().find_by_slug(&command.slug).await?.is_some() {
                return Err(ValidationError::DuplicateSlug.into());
            }
            ctx.categories().create(command).await
        })
        .map_err(AppError::slug_conflict)?;

        tracing::info!(category_id = category.id, user_id = user.id, "Category created");
        Ok(category)
    }

    async fn update_category(
        &self,
        session: &Session,
        id: i32,
        input: CategoryInput,
    ) -> AppResult<Category> {
        let user = self.auth.require_authenticated(session).await?;
        let command = UpdateCategory::from_input(id, input)?;

        let category = with_transaction!(self.uow, |ctx| {
            ctx.categories().find_by_id(command.id).await?.ok_or_not_found()?;
            if let Some(other) = ctx.categories().find_by_slug(&command.slug).await? {
                if other.id != command.id {
                    return Err(ValidationError::DuplicateSlug.into());
                }
            }
            ctx.categories().update(command).await
        })
        .map_err(AppError::slug_conflict)?;

        tracing::info!(category_id = category.id, user_id = user.id, "Category updated");
        Ok(category)
    }

    async fn delete_category(&self, session: &Session, id: i32) -> AppResult<()> {
        let user = self.auth.require_authenticated(session).await?;

        with_transaction!(self.uow, |ctx| {
            ctx.categories().find_by_id(id).await?.ok_or_not_found()?;
            if ctx.products().count_by_category(id).await? > 0 {
                return Err(AppError::Blocked(BlockReason::HasDependentProducts));
            }
            ctx.categories().delete(id).await
        })?;

        tracing::info!(category_id = id, user_id = user.id, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infra::repositories::MockUserRepository;
    use crate::services::test_support::TestUnitOfWork;
    use crate::services::Authenticator;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    /// Admin service whose store mocks have no expectations: any repository
    /// call or transaction fails the test.
    fn untouched_admin() -> AdminManager<TestUnitOfWork> {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let auth_uow = Arc::new(TestUnitOfWork::default().with_users(users));
        let auth = Arc::new(Authenticator::new(
            auth_uow,
            Config::new("sqlite::memory:", SECRET).unwrap(),
        ));

        AdminManager::new(Arc::new(TestUnitOfWork::default()), auth)
    }

    fn product_input() -> ProductInput {
        ProductInput {
            name: Some("Bolo".to_string()),
            price: Some("10".to_string()),
            category_id: Some("1".to_string()),
            ..Default::default()
        }
    }

    fn category_input() -> CategoryInput {
        CategoryInput {
            name: Some("Tortas".to_string()),
            slug: Some("tortas".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_anonymous_session_is_rejected_everywhere() {
        let admin = untouched_admin();
        let session = Session::anonymous();

        let results = vec![
            admin.dashboard(&session).await.err(),
            admin.list_products(&session).await.err(),
            admin.get_product(&session, 1).await.err(),
            admin.create_product(&session, product_input()).await.err(),
            admin.update_product(&session, 1, product_input()).await.err(),
            admin.delete_product(&session, 1).await.err(),
            admin.list_categories(&session).await.err(),
            admin.get_category(&session, 1).await.err(),
            admin.create_category(&session, category_input()).await.err(),
            admin.update_category(&session, 1, category_input()).await.err(),
            admin.delete_category(&session, 1).await.err(),
        ];

        for result in results {
            assert!(matches!(result, Some(AppError::Unauthorized)), "{result:?}");
        }
    }

    #[tokio::test]
    async fn test_session_for_deleted_user_is_rejected() {
        let admin = untouched_admin();
        let result = admin.delete_category(&Session::for_user(7), 1).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
