use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::entities::{NewUser, User, UserUpdate};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

/// Map-backed [`UserRepository`].
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: Mutex<Inner>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn email_taken() -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": "users_email_key" }),
    )
}

fn user_not_found(user_id: i64) -> AppError {
    AppError::not_found("User not found", json!({ "user_id": user_id }))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.lock();

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Err(email_taken());
        }

        inner.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            refresh_token_hash: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_by_refresh_token(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.refresh_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn set_refresh_token(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;

        user.refresh_token_hash = Some(token_hash.to_string());
        user.refresh_token_expires_at = Some(expires_at);
        user.updated_at = Utc::now();

        Ok(())
    }

    async fn clear_refresh_token(&self, user_id: i64) -> Result<(), AppError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;

        user.refresh_token_hash = None;
        user.refresh_token_expires_at = None;
        user.updated_at = Utc::now();

        Ok(())
    }

    async fn update(&self, user_id: i64, update: UserUpdate) -> Result<User, AppError> {
        let mut inner = self.lock();

        if inner
            .users
            .values()
            .any(|u| u.id != user_id && u.email == update.email)
        {
            return Err(email_taken());
        }

        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;

        user.email = update.email;
        user.password_hash = update.password_hash;
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}
