use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::store::{validate_content, Task, TaskStore};

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<(), StoreError> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tasks (
            id BIGSERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            done BOOLEAN NOT NULL DEFAULT FALSE,
            user_id TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS tasks_user_id_idx ON tasks (user_id)")
        .execute(pool)
        .await?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Create a new task and return its id
pub async fn create_task(pool: &PgPool, user_id: &str, content: &str) -> Result<i64, StoreError> {
    let content = validate_content(content)?;
    debug!(user_id = %user_id, "Creating new task");

    let task_id: i64 =
        sqlx::query_scalar("INSERT INTO tasks (content, user_id) VALUES ($1, $2) RETURNING id")
            .bind(content)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    info!(user_id = %user_id, task_id, "Task created");
    Ok(task_id)
}

/// List all tasks of a user, oldest first
pub async fn list_tasks(pool: &PgPool, user_id: &str) -> Result<Vec<Task>, StoreError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, content, done, user_id FROM tasks WHERE user_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    debug!(user_id = %user_id, count = tasks.len(), "Listed tasks");
    Ok(tasks)
}

/// Mark a task as done
pub async fn mark_task_done(pool: &PgPool, task_id: i64, user_id: &str) -> Result<(), StoreError> {
    let rows_affected = sqlx::query("UPDATE tasks SET done = TRUE WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

    expect_one_row(rows_affected, task_id, user_id, "marked done")
}

/// Delete a task
pub async fn delete_task(pool: &PgPool, task_id: i64, user_id: &str) -> Result<(), StoreError> {
    let rows_affected = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

    expect_one_row(rows_affected, task_id, user_id, "deleted")
}

/// Replace the content of a task
pub async fn update_task_content(
    pool: &PgPool,
    task_id: i64,
    user_id: &str,
    new_content: &str,
) -> Result<(), StoreError> {
    let new_content = validate_content(new_content)?;

    let rows_affected =
        sqlx::query("UPDATE tasks SET content = $1 WHERE id = $2 AND user_id = $3")
            .bind(new_content)
            .bind(task_id)
            .bind(user_id)
            .execute(pool)
            .await?
            .rows_affected();

    expect_one_row(rows_affected, task_id, user_id, "updated")
}

/// Read the content of a task
pub async fn read_task_content(
    pool: &PgPool,
    task_id: i64,
    user_id: &str,
) -> Result<String, StoreError> {
    let content: Option<String> =
        sqlx::query_scalar("SELECT content FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    content.ok_or(StoreError::NotFound(task_id))
}

fn expect_one_row(
    rows_affected: u64,
    task_id: i64,
    user_id: &str,
    verb: &str,
) -> Result<(), StoreError> {
    if rows_affected > 0 {
        info!(user_id = %user_id, task_id, "Task {verb}");
        Ok(())
    } else {
        info!(user_id = %user_id, task_id, "No matching task to be {verb}");
        Err(StoreError::NotFound(task_id))
    }
}

/// [`TaskStore`] backed by a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, owner: &str, content: &str) -> Result<i64, StoreError> {
        create_task(&self.pool, owner, content).await
    }

    async fn list(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        list_tasks(&self.pool, owner).await
    }

    async fn set_done(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        mark_task_done(&self.pool, id, owner).await
    }

    async fn delete(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        delete_task(&self.pool, id, owner).await
    }

    async fn edit(&self, id: i64, owner: &str, new_content: &str) -> Result<(), StoreError> {
        update_task_content(&self.pool, id, owner, new_content).await
    }

    async fn read_content(&self, id: i64, owner: &str) -> Result<String, StoreError> {
        read_task_content(&self.pool, id, owner).await
    }
}
