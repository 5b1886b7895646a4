use validator::Validate;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskInput};
use crate::store::TaskStore;

/// Parses a task id taken from a URL path segment.
pub fn parse_task_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation("Invalid task ID".into()))
}

/// Task operations, scoped to the owner wherever an owner is given.
#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: TaskStore,
}

impl TaskService {
    pub fn new(tasks: TaskStore) -> Self {
        Self { tasks }
    }

    /// All tasks owned by `user_id`, oldest first. An empty list is not an error.
    pub async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        self.tasks
            .list_for_owner(user_id)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to fetch tasks: {}", e)))
    }

    pub async fn create_task(&self, user_id: i64, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;

        let task = self
            .tasks
            .insert(NewTask {
                user_id,
                description: input.description,
                priority: input.priority.unwrap_or_default(),
            })
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create task: {}", e)))?;

        log::info!("user {} created task {}", user_id, task.id);
        Ok(task)
    }

    /// Deletes a task by id without checking who owns it.
    ///
    /// Deleting an id that does not exist succeeds.
    pub async fn delete_task(&self, task_id: i64) -> Result<(), AppError> {
        let removed = self
            .tasks
            .delete(task_id)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete task: {}", e)))?;

        if removed == 0 {
            log::debug!("delete of task {} matched no rows", task_id);
        } else {
            log::info!("deleted task {}", task_id);
        }
        Ok(())
    }

    /// Flips `completed` on a task owned by `user_id`.
    ///
    /// A task that exists but belongs to another user is reported as not found.
    pub async fn toggle_task_completed(&self, user_id: i64, task_id: i64) -> Result<Task, AppError> {
        let task = self
            .tasks
            .toggle_completed(task_id, user_id)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to toggle task completion: {}", e)))?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        log::info!(
            "user {} toggled task {} to completed={}",
            user_id,
            task.id,
            task.completed
        );
        Ok(task)
    }
}
