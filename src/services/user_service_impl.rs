//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use crate::config::SecurityConfig;
use crate::db::{Store, UserChanges};
use crate::services::passwords;
use crate::services::tokens::TokenIssuer;
use crate::services::user_service::{LoginResult, UserError, UserRecord, UserService, UserUpdate};

pub struct SeaOrmUserService {
    store: Store,
    tokens: TokenIssuer,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens,
            security,
        }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, UserError> {
        // Check-then-insert is not atomic; the unique indexes catch the
        // race and the insert error maps to Conflict as well.
        if self.store.find_taken_user(username, email).await?.is_some() {
            return Err(UserError::Conflict);
        }

        let password_hash = passwords::hash_password(password, &self.security).await?;

        let user = self
            .store
            .insert_user(username, email, &password_hash)
            .await?;

        Ok(UserRecord::from(user))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, UserError> {
        let Some(user) = self.store.get_user_by_username(username).await? else {
            return Err(UserError::InvalidCredentials);
        };

        let is_valid = passwords::verify_password(password, &user.password_hash).await?;
        if !is_valid {
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(LoginResult {
            token,
            user: UserRecord::from(user),
        })
    }

    async fn get(&self, id: i32) -> Result<UserRecord, UserError> {
        let user = self.store.get_user(id).await?.ok_or(UserError::NotFound)?;

        Ok(UserRecord::from(user))
    }

    async fn list(&self, limit: u64, page: u64) -> Result<(Vec<UserRecord>, u64), UserError> {
        let (rows, total) = self.store.list_users(limit, page).await?;

        Ok((rows.into_iter().map(UserRecord::from).collect(), total))
    }

    async fn update(&self, id: i32, update: UserUpdate) -> Result<UserRecord, UserError> {
        let password_hash = match update.password {
            Some(ref password) => Some(passwords::hash_password(password, &self.security).await?),
            None => None,
        };

        let changes = UserChanges {
            username: update.username,
            email: update.email,
            password_hash,
        };

        let user = self
            .store
            .update_user(id, changes)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(UserRecord::from(user))
    }

    async fn delete(&self, id: i32) -> Result<(), UserError> {
        let deleted = self.store.delete_user(id).await?;
        if !deleted {
            return Err(UserError::NotFound);
        }

        Ok(())
    }
}
