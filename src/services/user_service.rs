//! Domain service for account registration, login, and user management.

use serde::Serialize;
use thiserror::Error;

use crate::entities::users;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Username or email already registered.
    #[error("Username or email already in use")]
    Conflict,

    /// Deliberately identical for unknown username and wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        // Backstop for the register pre-check losing a race to a
        // concurrent duplicate insert.
        if let Some(db_err) = err.downcast_ref::<sea_orm::DbErr>() {
            if matches!(
                db_err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                return Self::Conflict;
            }
            return Self::Database(db_err.to_string());
        }
        Self::Internal(err.to_string())
    }
}

/// Account DTO for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for UserRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Successful login: the bearer token plus the account it identifies.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserRecord,
}

/// Partial account update. Password, if present, is re-hashed before
/// persisting.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Conflict`] if the username or email is taken.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, UserError>;

    /// Verifies credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] for an unknown username
    /// and for a wrong password alike.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, UserError>;

    async fn get(&self, id: i32) -> Result<UserRecord, UserError>;

    /// Lists accounts. Returns the requested page plus the total row
    /// count.
    async fn list(&self, limit: u64, page: u64) -> Result<(Vec<UserRecord>, u64), UserError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if no account matches `id`.
    async fn update(&self, id: i32, update: UserUpdate) -> Result<UserRecord, UserError>;

    /// Returns [`UserError::NotFound`] if no account matches `id`.
    async fn delete(&self, id: i32) -> Result<(), UserError>;
}
