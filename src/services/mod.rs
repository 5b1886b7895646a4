//! Business rules sitting between the HTTP handlers and the stores.
//!
//! Services speak in `AppError` and typed values; they know nothing about
//! requests or responses.

pub mod auth;
pub mod tasks;

pub use auth::AuthService;
pub use tasks::{parse_task_id, TaskService};
