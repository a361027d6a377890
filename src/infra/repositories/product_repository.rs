//! Product repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::category::Entity as CategoryEntity;
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{
    Category, CreateProduct, ImageChange, Product, ProductListing, UpdateProduct,
};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Read access to products.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// List products in store order, optionally capped
    async fn list(&self, limit: Option<u64>) -> AppResult<Vec<Product>>;

    /// List every product joined with its category
    async fn list_with_category(&self) -> AppResult<Vec<ProductListing>>;

    /// List products belonging to a category
    async fn list_by_category(&self, category_id: i32) -> AppResult<Vec<Product>>;

    /// Count all products
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        find_by_id(&self.db, id).await
    }

    async fn list(&self, limit: Option<u64>) -> AppResult<Vec<Product>> {
        let mut query = ProductEntity::find().order_by_asc(product::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query.all(&self.db).await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn list_with_category(&self) -> AppResult<Vec<ProductListing>> {
        let rows = ProductEntity::find()
            .find_also_related(CategoryEntity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(product, category)| ProductListing {
                product: Product::from(product),
                category: category.map(Category::from),
            })
            .collect())
    }

    async fn list_by_category(&self, category_id: i32) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(ProductEntity::find().count(&self.db).await?)
    }
}

/// Transaction-bound product repository.
pub struct TxProductRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxProductRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        find_by_id(self.txn, id).await
    }

    /// Find the first product with this exact name (seed natural key)
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let result = ProductEntity::find()
            .filter(product::Column::Name.eq(name))
            .order_by_asc(product::Column::Id)
            .one(self.txn)
            .await?;

        Ok(result.map(Product::from))
    }

    /// Count products referencing a category
    pub async fn count_by_category(&self, category_id: i32) -> AppResult<u64> {
        Ok(ProductEntity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .count(self.txn)
            .await?)
    }

    pub async fn create(&self, command: CreateProduct) -> AppResult<Product> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(command.name),
            description: Set(command.description),
            price: Set(command.price),
            category_id: Set(command.category_id),
            image_filename: Set(command.image_filename),
        }
        .insert(self.txn)
        .await?;

        Ok(Product::from(model))
    }

    pub async fn update(&self, command: UpdateProduct) -> AppResult<Product> {
        let existing = ProductEntity::find_by_id(command.id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(command.name);
        active.description = Set(command.description);
        active.price = Set(command.price);
        active.category_id = Set(command.category_id);
        if let ImageChange::Replace(filename) = command.image {
            active.image_filename = Set(Some(filename));
        }

        let model = active.update(self.txn).await?;
        Ok(Product::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<Product>> {
    let result = ProductEntity::find_by_id(id).one(db).await?;
    Ok(result.map(Product::from))
}
