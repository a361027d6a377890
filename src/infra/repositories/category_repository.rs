//! Category repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use crate::domain::{Category, CreateCategory, UpdateCategory};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Read access to categories.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    /// Find category by its unique slug
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>>;

    /// List all categories in insertion order
    async fn list(&self) -> AppResult<Vec<Category>>;

    /// Count all categories
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        find_by_slug(&self.db, slug).await
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(CategoryEntity::find().count(&self.db).await?)
    }
}

/// Transaction-bound category repository.
///
/// Writes go through here so that pre-checks and the write share a
/// transaction.
pub struct TxCategoryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCategoryRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        find_by_id(self.txn, id).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        find_by_slug(self.txn, slug).await
    }

    pub async fn create(&self, command: CreateCategory) -> AppResult<Category> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(command.name),
            slug: Set(command.slug),
            description: Set(command.description),
        }
        .insert(self.txn)
        .await?;

        Ok(Category::from(model))
    }

    pub async fn update(&self, command: UpdateCategory) -> AppResult<Category> {
        let existing = CategoryEntity::find_by_id(command.id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(command.name);
        active.slug = Set(command.slug);
        active.description = Set(command.description);

        let model = active.update(self.txn).await?;
        Ok(Category::from(model))
    }

    /// Delete by ID; callers check for dependent products first.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CategoryEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<Category>> {
    let result = CategoryEntity::find_by_id(id).one(db).await?;
    Ok(result.map(Category::from))
}

async fn find_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<Option<Category>> {
    let result = CategoryEntity::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await?;

    Ok(result.map(Category::from))
}
