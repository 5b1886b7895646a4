pub mod auth;
pub mod health;
pub mod tasks;

use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web};
use sqlx::SqlitePool;

use crate::{
    auth::{AuthMiddleware, TokenKeys},
    config::AuthConfig,
    error::AppError,
    services::{AuthService, TaskService},
    store::{TaskStore, UserStore},
};

/// Everything the routes need, built once at startup and cloned into each worker.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub keys: Arc<TokenKeys>,
    pub auth: AuthService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth_config: &AuthConfig) -> Self {
        let keys = Arc::new(TokenKeys::from_config(auth_config));
        Self {
            auth: AuthService::new(
                UserStore::new(pool.clone()),
                Arc::clone(&keys),
                auth_config.bcrypt_cost,
            ),
            tasks: TaskService::new(TaskStore::new(pool.clone())),
            keys,
            pool,
        }
    }
}

/// Registers application data and every route.
///
/// `/register`, `/login`, `/health` and `DELETE /api/tasks/{id}` are public;
/// the rest of `/api` sits behind [`AuthMiddleware`]. The delete route has to be
/// registered before the `/api` scope, which would otherwise claim the path.
pub fn config(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(json_config())
        .app_data(web::Data::new(state.pool.clone()))
        .app_data(web::Data::new(state.auth.clone()))
        .app_data(web::Data::new(state.tasks.clone()))
        .service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(tasks::delete_task)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware::new(Arc::clone(&state.keys)))
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::toggle_task),
        );
}

/// JSON body errors render as `400 {"error": ...}` like every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = match &err {
            JsonPayloadError::Deserialize(e) => e.to_string(),
            other => other.to_string(),
        };
        AppError::Validation(format!("Invalid request body: {}", detail)).into()
    })
}
