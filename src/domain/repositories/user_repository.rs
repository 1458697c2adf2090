//! Repository trait for account data access.

use crate::domain::entities::{NewUser, User, UserUpdate};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for registered accounts and their refresh tokens.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUserRepository`] - In-process fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds an account by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds the account holding the given refresh token digest.
    async fn find_by_refresh_token(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Stores a refresh token digest and its expiry, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    async fn set_refresh_token(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Clears the stored refresh token so it can no longer be exchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    async fn clear_refresh_token(&self, user_id: i64) -> Result<(), AppError>;

    /// Replaces the email and password hash of an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    /// Returns [`AppError::Conflict`] if the new email is taken.
    async fn update(&self, user_id: i64, update: UserUpdate) -> Result<User, AppError>;
}
