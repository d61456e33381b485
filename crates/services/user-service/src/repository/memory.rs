//! In-memory user repository.
//!
//! Used for database-free runs and tests. A single read/write lock guards the
//! record map and the id counter; it is held only for one map access.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::UserRecord;

use super::UserRepository;

#[derive(Debug)]
struct State {
    users: HashMap<i32, UserRecord>,
    next_id: i32,
}

/// Map-backed implementation of UserRepository.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug)]
pub struct InMemoryUserStore {
    state: RwLock<State>,
}

impl InMemoryUserStore {
    /// Empty store; the first created user gets id 1
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, name: String, date_of_birth: NaiveDate) -> AppResult<UserRecord> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| AppError::internal("user id space exhausted"))?;

        let record = UserRecord::new(id, name, date_of_birth);
        state.users.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: i32) -> AppResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let state = self.state.read().await;
        let mut users: Vec<UserRecord> = state.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn update(
        &self,
        id: i32,
        name: String,
        date_of_birth: NaiveDate,
    ) -> AppResult<UserRecord> {
        let mut state = self.state.write().await;
        let record = state.users.get_mut(&id).ok_or(AppError::NotFound)?;

        record.name = name;
        record.date_of_birth = date_of_birth;
        Ok(record.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        state
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}
