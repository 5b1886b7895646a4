use std::sync::Arc;

use validator::Validate;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{Credentials, TokenKeys};
use crate::error::AppError;
use crate::store::UserStore;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    keys: Arc<TokenKeys>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: UserStore, keys: Arc<TokenKeys>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            keys,
            bcrypt_cost,
        }
    }

    /// Creates a user and returns its id.
    ///
    /// Fails with `Validation` on empty fields, `Conflict` when the username is
    /// taken and `Storage` on any other persistence failure.
    pub async fn register(&self, credentials: Credentials) -> Result<i64, AppError> {
        credentials.validate()?;
        let Credentials { username, password } = credentials;

        let password_hash = hash_password_blocking(password, self.bcrypt_cost).await?;

        match self.users.insert(&username, &password_hash).await {
            Ok(user_id) => {
                log::info!("registered user {} ({})", user_id, username);
                Ok(user_id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                log::info!("registration rejected, username taken: {}", username);
                Err(AppError::Conflict("Username already exists".into()))
            }
            Err(e) => Err(AppError::Storage(format!("Failed to insert user: {}", e))),
        }
    }

    /// Verifies the credentials and returns a signed access token.
    ///
    /// An unknown username and a wrong password produce the same `Auth` error.
    pub async fn login(&self, credentials: Credentials) -> Result<String, AppError> {
        credentials.validate()?;
        let Credentials { username, password } = credentials;

        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to look up user: {}", e)))?;

        let Some(user) = user else {
            log::warn!("failed login for unknown user {}", username);
            return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
        };

        if !verify_password_blocking(password, user.password).await? {
            log::warn!("failed login for user {}", user.id);
            return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
        }

        let token = self.keys.issue(user.id)?;
        log::info!("user {} logged in", user.id);
        Ok(token)
    }
}
