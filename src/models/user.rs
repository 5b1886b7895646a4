use sqlx::FromRow;

/// A user row as stored in the `users` table.
///
/// `password` always holds a bcrypt hash. Not `Serialize`: the hash must never
/// reach a response body.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password: String,
}
