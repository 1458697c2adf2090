//! Account entity.

use chrono::{DateTime, Utc};

/// A registered account that owns short URLs.
///
/// Only digests are stored: `password_hash` is an Argon2 PHC string and
/// `refresh_token_hash` is the HMAC of the issued refresh token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub refresh_token_hash: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the stored refresh token can still be exchanged.
    pub fn has_live_refresh_token(&self) -> bool {
        self.refresh_token_hash.is_some()
            && self
                .refresh_token_expires_at
                .is_some_and(|expires_at| Utc::now() < expires_at)
    }
}

/// Input data for registering a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Replacement credentials for an existing account.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(hash: Option<&str>, expires_at: Option<DateTime<Utc>>) -> User {
        User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            refresh_token_hash: hash.map(str::to_string),
            refresh_token_expires_at: expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_refresh_token() {
        let u = user(Some("abc"), Some(Utc::now() + Duration::days(1)));
        assert!(u.has_live_refresh_token());
    }

    #[test]
    fn test_expired_refresh_token() {
        let u = user(Some("abc"), Some(Utc::now() - Duration::seconds(1)));
        assert!(!u.has_live_refresh_token());
    }

    #[test]
    fn test_revoked_refresh_token() {
        let u = user(None, None);
        assert!(!u.has_live_refresh_token());
    }
}
