use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::TaskInput,
    services::{parse_task_id, TaskService},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;

/// Lists the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...], "count": n}`; an empty list is fine.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: storage failure.
#[get("/tasks")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list_tasks(user.user_id()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "count": tasks.len(),
        "tasks": tasks,
    })))
}

/// Creates a task owned by the caller.
///
/// ## Request Body:
/// - `description`: required, non-empty.
/// - `priority` (optional): `"notset"`, `"low"`, `"normal"`/`"medium"` or `"high"`.
///
/// ## Responses:
/// - `201 Created`: `{"message", "task"}`.
/// - `400 Bad Request`: malformed body, empty description or unknown priority.
/// - `401 Unauthorized`: missing or invalid token.
#[post("/tasks")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .create_task(user.user_id(), task_data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "task": task,
    })))
}

/// Flips the completion flag of one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"message"}`.
/// - `400 Bad Request`: the id is not an integer.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no such task for this caller, including tasks owned by others.
#[patch("/tasks/{id}/toggle")]
pub async fn toggle_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&task_id)?;
    tasks.toggle_task_completed(user.user_id(), task_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task completion toggled",
    })))
}

/// Deletes a task by id.
///
/// Mounted outside the authenticated scope and does not check ownership.
///
/// ## Responses:
/// - `200 OK`: `{"message"}`, also when no task had that id.
/// - `400 Bad Request`: the id is not an integer.
/// - `500 Internal Server Error`: storage failure.
#[delete("/api/tasks/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&task_id)?;
    tasks.delete_task(task_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully",
    })))
}
