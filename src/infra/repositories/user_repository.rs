//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, NotSet, QueryFilter, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{CreateUser, User};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// Read access to admin users.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by login name
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        find_by_username(&self.db, username).await
    }
}

/// Transaction-bound user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        find_by_username(self.txn, username).await
    }

    pub async fn create(&self, command: CreateUser) -> AppResult<User> {
        let model = ActiveModel {
            id: NotSet,
            username: Set(command.username),
            password_hash: Set(command.password.into_string()),
        }
        .insert(self.txn)
        .await?;

        Ok(User::from(model))
    }
}

async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(result.map(User::from))
}
