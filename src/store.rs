//! # Task Store Module
//!
//! The persistence seam for tasks. Every operation except `create` is
//! scoped by owner: a task is only visible to, and only mutable by, the
//! owner it was created for.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::StoreError;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub content: String,
    pub done: bool,
    pub user_id: String,
}

/// Trim task content and reject it when nothing is left
pub fn validate_content(content: &str) -> Result<&str, StoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyContent);
    }
    Ok(trimmed)
}

/// Async interface for task persistence
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task and return its newly assigned id
    async fn create(&self, owner: &str, content: &str) -> Result<i64, StoreError>;

    /// All tasks of `owner`, ascending by id
    async fn list(&self, owner: &str) -> Result<Vec<Task>, StoreError>;

    /// Mark a task as done
    async fn set_done(&self, id: i64, owner: &str) -> Result<(), StoreError>;

    /// Remove a task
    async fn delete(&self, id: i64, owner: &str) -> Result<(), StoreError>;

    /// Replace a task's content
    async fn edit(&self, id: i64, owner: &str, new_content: &str) -> Result<(), StoreError>;

    /// Current content of a task, used to prefill the edit form
    async fn read_content(&self, id: i64, owner: &str) -> Result<String, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    tasks: BTreeMap<i64, Task>,
}

/// In-process store with the same owner scoping as the Postgres one.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    state: Mutex<MemoryState>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, owner: &str, content: &str) -> Result<i64, StoreError> {
        let content = validate_content(content)?;
        let mut state = self.state.lock().await;
        state.last_id += 1;
        let id = state.last_id;
        state.tasks.insert(
            id,
            Task {
                id,
                content: content.to_string(),
                done: false,
                user_id: owner.to_string(),
            },
        );
        debug!(user_id = %owner, task_id = id, "Task created in memory store");
        Ok(id)
    }

    async fn list(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.user_id == owner)
            .cloned()
            .collect())
    }

    async fn set_done(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        match state.tasks.get_mut(&id) {
            Some(task) if task.user_id == owner => {
                task.done = true;
                Ok(())
            }
            _ => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        match state.tasks.get(&id) {
            Some(task) if task.user_id == owner => {
                state.tasks.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(id)),
        }
    }

    async fn edit(&self, id: i64, owner: &str, new_content: &str) -> Result<(), StoreError> {
        let new_content = validate_content(new_content)?;
        let mut state = self.state.lock().await;
        match state.tasks.get_mut(&id) {
            Some(task) if task.user_id == owner => {
                task.content = new_content.to_string();
                Ok(())
            }
            _ => Err(StoreError::NotFound(id)),
        }
    }

    async fn read_content(&self, id: i64, owner: &str) -> Result<String, StoreError> {
        let state = self.state.lock().await;
        state
            .tasks
            .get(&id)
            .filter(|task| task.user_id == owner)
            .map(|task| task.content.clone())
            .ok_or(StoreError::NotFound(id))
    }
}
