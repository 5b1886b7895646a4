#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Personal task management behind username/password authentication: users"]
#![doc = "register, log in for a short-lived JWT, and manage tasks only they can see."]
#![doc = "The binary (`main.rs`) loads configuration and serves [`routes::config`]."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod recover;
pub mod routes;
pub mod services;
pub mod store;

pub use error::AppError;
pub use routes::AppState;
