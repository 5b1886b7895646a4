use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{NewTask, Task};

const TASK_COLUMNS: &str = "id, user_id, description, importance, completed, created_at, updated_at";

/// Task storage backed by the `tasks` table.
///
/// Every query that reads or mutates a single task on behalf of a user filters
/// on both `id` and `user_id`; a task owned by someone else is indistinguishable
/// from a missing one.
#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_owner(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!("SELECT {} FROM tasks WHERE user_id = ? ORDER BY id", TASK_COLUMNS);
        sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Inserts a task and returns the stored row, timestamps included.
    ///
    /// New tasks always start incomplete.
    pub async fn insert(&self, task: NewTask) -> Result<Task, sqlx::Error> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO tasks (user_id, description, importance, completed, created_at, updated_at) \
             VALUES (?, ?, ?, 0, ?, ?) RETURNING {}",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(task.user_id)
            .bind(task.description)
            .bind(task.priority)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find_for_owner(&self, id: i64, user_id: i64) -> Result<Option<Task>, sqlx::Error> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ? AND user_id = ?", TASK_COLUMNS);
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Deletes a task by id alone and returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Flips `completed` on the task matching both `id` and `user_id`.
    ///
    /// Only the `completed` column is written. Returns `None` when no such task
    /// exists for that owner.
    pub async fn toggle_completed(&self, id: i64, user_id: i64) -> Result<Option<Task>, sqlx::Error> {
        let sql = format!(
            "UPDATE tasks SET completed = NOT completed WHERE id = ? AND user_id = ? RETURNING {}",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }
}
