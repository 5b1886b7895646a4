use crate::{
    auth::{Credentials, LoginResponse, RegisterResponse},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `{"message", "user_id"}`.
/// - `400 Bad Request`: malformed body or empty username/password.
/// - `409 Conflict`: the username is taken.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let user_id = auth.register(credentials.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        user_id,
    }))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{"message", "token"}`.
/// - `400 Bad Request`: malformed body or empty username/password.
/// - `401 Unauthorized`: unknown username or wrong password, indistinguishably.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let token = auth.login(credentials.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".into(),
        token,
    }))
}
