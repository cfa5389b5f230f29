//! Task Manager module for applying intents to the task store

use tracing::{debug, info};

use crate::command::Intent;
use crate::errors::StoreError;
use crate::store::{Task, TaskStore};

/// Result of handling one intent, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { id: i64, content: String },
    /// The owner's tasks after a list, done, edit or delete
    Tasks(Vec<Task>),
    EditForm { id: i64, content: String },
    NotFound { id: i64 },
    EmptyContent,
    InvalidTaskId,
    UnknownAction,
    InvalidAction,
    Help,
}

/// Apply an intent on behalf of `owner`.
///
/// Not-found and empty-content failures become outcomes; only storage
/// failures are returned as errors.
pub async fn execute_intent(
    store: &dyn TaskStore,
    owner: &str,
    intent: Intent,
) -> Result<Outcome, StoreError> {
    debug!(user_id = %owner, intent = ?intent, "Executing intent");

    match apply_intent(store, owner, intent).await {
        Ok(outcome) => Ok(outcome),
        Err(StoreError::NotFound(id)) => {
            info!(user_id = %owner, task_id = id, "Task not found for owner");
            Ok(Outcome::NotFound { id })
        }
        Err(StoreError::EmptyContent) => {
            info!(user_id = %owner, "Rejected empty task content");
            Ok(Outcome::EmptyContent)
        }
        Err(e) => Err(e),
    }
}

async fn apply_intent(
    store: &dyn TaskStore,
    owner: &str,
    intent: Intent,
) -> Result<Outcome, StoreError> {
    match intent {
        Intent::Add { content } => {
            let id = store.create(owner, &content).await?;
            Ok(Outcome::Added {
                id,
                content: content.trim().to_string(),
            })
        }
        Intent::List => store.list(owner).await.map(Outcome::Tasks),
        Intent::Done { id } => {
            store.set_done(id, owner).await?;
            store.list(owner).await.map(Outcome::Tasks)
        }
        Intent::Edit { id, content } => {
            store.edit(id, owner, &content).await?;
            store.list(owner).await.map(Outcome::Tasks)
        }
        Intent::Delete { id } => {
            store.delete(id, owner).await?;
            store.list(owner).await.map(Outcome::Tasks)
        }
        Intent::ShowEditForm { id } => {
            let content = store.read_content(id, owner).await?;
            Ok(Outcome::EditForm { id, content })
        }
        Intent::Help => Ok(Outcome::Help),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTaskStore;
    use async_trait::async_trait;

    /// Store whose every call fails as if the database were unreachable
    struct UnavailableStore;

    fn unavailable() -> StoreError {
        StoreError::Database(sqlx::Error::PoolTimedOut)
    }

    #[async_trait]
    impl TaskStore for UnavailableStore {
        async fn create(&self, _owner: &str, _content: &str) -> Result<i64, StoreError> {
            Err(unavailable())
        }

        async fn list(&self, _owner: &str) -> Result<Vec<Task>, StoreError> {
            Err(unavailable())
        }

        async fn set_done(&self, _id: i64, _owner: &str) -> Result<(), StoreError> {
            Err(unavailable())
        }

        async fn delete(&self, _id: i64, _owner: &str) -> Result<(), StoreError> {
            Err(unavailable())
        }

        async fn edit(&self, _id: i64, _owner: &str, _content: &str) -> Result<(), StoreError> {
            Err(unavailable())
        }

        async fn read_content(&self, _id: i64, _owner: &str) -> Result<String, StoreError> {
            Err(unavailable())
        }
    }

    #[tokio::test]
    async fn test_storage_failures_are_propagated() {
        let intents = [
            Intent::Add {
                content: "x".to_string(),
            },
            Intent::List,
            Intent::Done { id: 1 },
            Intent::Edit {
                id: 1,
                content: "y".to_string(),
            },
            Intent::Delete { id: 1 },
            Intent::ShowEditForm { id: 1 },
        ];

        for intent in intents {
            let result = execute_intent(&UnavailableStore, "alice", intent.clone()).await;
            assert!(
                matches!(result, Err(StoreError::Database(_))),
                "{intent:?} should fail with a storage error, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_add_reports_id_and_trimmed_content() {
        let store = MemoryTaskStore::new();
        let outcome = execute_intent(
            &store,
            "alice",
            Intent::Add {
                content: " Buy milk ".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            outcome,
            Outcome::Added {
                id: 1,
                content: "Buy milk".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_done_returns_refreshed_list() {
        let store = MemoryTaskStore::new();
        let id = store.create("alice", "Buy milk").await.unwrap();

        let outcome = execute_intent(&store, "alice", Intent::Done { id }).await.unwrap();
        match outcome {
            Outcome::Tasks(tasks) => {
                assert_eq!(tasks.len(), 1);
                assert!(tasks[0].done);
            }
            other => panic!("expected task list, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_found_becomes_outcome() {
        let store = MemoryTaskStore::new();
        let id = store.create("alice", "mine").await.unwrap();

        let outcome = execute_intent(&store, "bob", Intent::Delete { id }).await.unwrap();
        assert_eq!(outcome, Outcome::NotFound { id });
    }

    #[tokio::test]
    async fn test_empty_edit_becomes_outcome() {
        let store = MemoryTaskStore::new();
        let id = store.create("alice", "mine").await.unwrap();

        let outcome = execute_intent(
            &store,
            "alice",
            Intent::Edit {
                id,
                content: String::new(),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::EmptyContent);
        assert_eq!(store.read_content(id, "alice").await.unwrap(), "mine");
    }

    #[tokio::test]
    async fn test_show_edit_form_prefills_content() {
        let store = MemoryTaskStore::new();
        let id = store.create("alice", "draft").await.unwrap();

        let outcome = execute_intent(&store, "alice", Intent::ShowEditForm { id })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::EditForm {
                id,
                content: "draft".to_string()
            }
        );
    }
}
