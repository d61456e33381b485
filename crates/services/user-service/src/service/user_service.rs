//! User service - Handles user-related business logic.
//!
//! Validation runs before any persistence call, so a rejected request never
//! writes. Ages are computed from the injected clock each time a response is
//! built.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{parse_date, Clock, SystemClock, UserInput, UserRecord, UserResponse, Validator};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and create a new user
    async fn create_user(&self, name: String, raw_dob: String) -> AppResult<UserResponse>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<UserResponse>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Validate and replace a user's name and date of birth
    async fn update_user(&self, id: i32, name: String, raw_dob: String)
        -> AppResult<UserResponse>;

    /// Delete user by ID
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    validator: Validator,
    clock: Arc<dyn Clock>,
}

impl UserManager {
    /// Create new user service instance with its collaborators
    pub fn new(repo: Arc<dyn UserRepository>, validator: Validator, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            validator,
            clock,
        }
    }

    /// Create a service using the default rules and the UTC wall clock
    pub fn with_system_clock(repo: Arc<dyn UserRepository>) -> Self {
        Self::new(repo, Validator::new(), Arc::new(SystemClock))
    }

    /// Run the rule table and parse the date of birth.
    fn validate(&self, operation: &'static str, name: &str, raw_dob: &str) -> AppResult<NaiveDate> {
        let input = UserInput {
            name,
            date_of_birth: raw_dob,
        };

        if let Err(violations) = self.validator.validate(&input, self.clock.today()) {
            let err = AppError::Validation(violations);
            warn!(operation, error = %err, "validation failed");
            return Err(err);
        }

        Ok(parse_date(raw_dob)?)
    }

    fn respond(&self, record: UserRecord) -> UserResponse {
        UserResponse::from_record(record, self.clock.today())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, name: String, raw_dob: String) -> AppResult<UserResponse> {
        let dob = self.validate("create_user", &name, &raw_dob)?;

        let record = self.repo.create(name, dob).await.map_err(|e| {
            error!(error = %e, "failed to create user");
            e
        })?;

        Ok(self.respond(record))
    }

    async fn get_user(&self, id: i32) -> AppResult<UserResponse> {
        let record = self.repo.get(id).await?.ok_or_not_found()?;
        Ok(self.respond(record))
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let records = self.repo.list().await?;
        Ok(records.into_iter().map(|r| self.respond(r)).collect())
    }

    async fn update_user(
        &self,
        id: i32,
        name: String,
        raw_dob: String,
    ) -> AppResult<UserResponse> {
        let dob = self.validate("update_user", &name, &raw_dob)?;

        let record = self.repo.update(id, name, dob).await.map_err(|e| {
            if !matches!(e, AppError::NotFound) {
                error!(user_id = id, error = %e, "failed to update user");
            }
            e
        })?;

        Ok(self.respond(record))
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        match self.repo.delete(id).await {
            Ok(()) => {
                info!(user_id = id, "user deleted successfully");
                Ok(())
            }
            Err(e) => {
                error!(user_id = id, error = %e, "failed to delete user");
                Err(e)
            }
        }
    }
}
