//! User repository: the persistence port and its SeaORM implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::UserRecord;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Operations on distinct ids are independent; implementations serialize
/// writes to the same id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning its id
    async fn create(&self, name: String, date_of_birth: NaiveDate) -> AppResult<UserRecord>;

    /// Find user by ID
    async fn get(&self, id: i32) -> AppResult<Option<UserRecord>>;

    /// List all users, ordered by id
    async fn list(&self) -> AppResult<Vec<UserRecord>>;

    /// Replace name and date of birth; `NotFound` if the id does not exist
    async fn update(&self, id: i32, name: String, date_of_birth: NaiveDate)
        -> AppResult<UserRecord>;

    /// Delete user by ID; `NotFound` if the id does not exist
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Postgres-backed implementation of UserRepository
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
    async fn create(&self, name: String, date_of_birth: NaiveDate) -> AppResult<UserRecord> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(name),
            dob: Set(date_of_birth),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(UserRecord::from(model))
    }

    async fn get(&self, id: i32) -> AppResult<Option<UserRecord>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserRecord::from))
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(UserRecord::from).collect())
    }

    async fn update(
        &self,
        id: i32,
        name: String,
        date_of_birth: NaiveDate,
    ) -> AppResult<UserRecord> {
        // Single UPDATE ... RETURNING; no row means the id does not exist
        let active = ActiveModel {
            id: Set(id),
            name: Set(name),
            dob: Set(date_of_birth),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(UserRecord::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
