//! Account registration, login and token validation.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use validator::ValidateEmail;

use crate::domain::entities::{NewUser, User, UserUpdate};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::security::{
    RefreshTokenSigner, TokenIssuer, generate_refresh_token, hash_password, verify_password,
};

/// Tokens handed to a client after a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

/// A freshly minted access token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: u64,
}

/// Service for account management and Bearer token authentication.
///
/// Access tokens are stateless HS256 JWTs. Refresh tokens are random and
/// stored only as an HMAC-SHA256 digest keyed by the same secret, so the
/// database alone is not enough to forge or replay one.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    issuer: TokenIssuer,
    signer: RefreshTokenSigner,
    refresh_ttl: Duration,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - account storage
    /// - `secret` - JWT signing key, also keys refresh token digests
    /// - `access_ttl` - lifetime of access tokens
    /// - `refresh_ttl` - lifetime of refresh tokens
    pub fn new(repository: Arc<R>, secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            repository,
            issuer: TokenIssuer::new(secret, access_ttl),
            signer: RefreshTokenSigner::new(secret),
            refresh_ttl,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email or empty password.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = validate_credentials(email, password)?;
        let password_hash = self.hash(password).await?;

        self.repository
            .create(NewUser {
                email,
                password_hash,
            })
            .await
    }

    /// Verifies credentials and starts a session.
    ///
    /// Any previously issued refresh token is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown email and
    /// [`AppError::Unauthorized`] for a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Email and password are required",
                json!({}),
            ));
        }

        let user = self
            .repository
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        if !self.verify(password, &user.password_hash).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid password"}),
            ));
        }

        let access = self.issue_access_token(user.id)?;

        let refresh_token = generate_refresh_token().map_err(|e| {
            tracing::error!(error = %e, "Failed to generate refresh token");
            AppError::internal("Failed to generate refresh token", json!({}))
        })?;
        let expires_at = Utc::now() + chrono_duration(self.refresh_ttl);

        self.repository
            .set_refresh_token(user.id, &self.signer.digest(&refresh_token), expires_at)
            .await?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(Session {
            user,
            access_token: access.token,
            refresh_token,
            expires_in: access.expires_in,
        })
    }

    /// Exchanges a live refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, revoked or expired.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AppError> {
        let user = self
            .repository
            .find_by_refresh_token(&self.signer.digest(refresh_token))
            .await?
            .filter(User::has_live_refresh_token)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or expired refresh token"}),
                )
            })?;

        self.issue_access_token(user.id)
    }

    /// Resolves an access token to its account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token fails verification or
    /// the account no longer exists.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, AppError> {
        let claims = self.issuer.verify(access_token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AppError::unauthorized("Unauthorized", json!({"reason": "Invalid token"}))
        })?;

        let user_id = claims.user_id().ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({"reason": "Invalid token subject"}))
        })?;

        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized", json!({"reason": "Unknown user"})))
    }

    /// Replaces the email and password of an account.
    pub async fn update_user(
        &self,
        user_id: i64,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = validate_credentials(email, password)?;
        let password_hash = self.hash(password).await?;

        self.repository
            .update(
                user_id,
                UserUpdate {
                    email,
                    password_hash,
                },
            )
            .await
    }

    /// Revokes the account's refresh token. Outstanding access tokens stay
    /// valid until they expire.
    pub async fn logout(&self, user_id: i64) -> Result<(), AppError> {
        self.repository.clear_refresh_token(user_id).await
    }

    fn issue_access_token(&self, user_id: i64) -> Result<AccessToken, AppError> {
        let token = self.issuer.issue(user_id).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            AppError::internal("Failed to issue token", json!({}))
        })?;

        Ok(AccessToken {
            token,
            expires_in: self.issuer.access_ttl().as_secs(),
        })
    }

    // Argon2 blocks for tens of milliseconds, so it runs on the blocking pool.
    async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AppError::internal("Failed to hash password", json!({}))
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to hash password");
                AppError::internal("Failed to hash password", json!({}))
            })
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                AppError::internal("Failed to verify password", json!({}))
            })
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<String, AppError> {
    let email = email.trim();

    if email.is_empty() || !email.validate_email() {
        return Err(AppError::bad_request(
            "Invalid email",
            json!({"field": "email"}),
        ));
    }

    if password.is_empty() {
        return Err(AppError::bad_request(
            "Password must not be empty",
            json!({"field": "password"}),
        ));
    }

    Ok(email.to_string())
}

fn chrono_duration(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    const SECRET: &str = "test-signing-secret";

    fn user(id: i64, email: &str, password: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            refresh_token_hash: None,
            refresh_token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(
            Arc::new(repo),
            SECRET,
            Duration::from_secs(3600),
            Duration::from_secs(60 * 24 * 3600),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|new| new.email == "a@example.com" && new.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|new| {
                Ok(User {
                    id: 1,
                    email: new.email,
                    password_hash: new.password_hash,
                    refresh_token_hash: None,
                    refresh_token_expires_at: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let created = service(mock_repo)
            .register(" a@example.com ", "hunter2")
            .await
            .unwrap();

        assert_eq!(created.email, "a@example.com");
        assert!(verify_password("hunter2", &created.password_hash));
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, update| {
                *id == 3
                    && update.email == "b@example.com"
                    && verify_password("new-secret", &update.password_hash)
            })
            .times(1)
            .returning(|id, update| {
                let mut updated = user(id, &update.email, "unused");
                updated.password_hash = update.password_hash;
                Ok(updated)
            });

        let updated = service(mock_repo)
            .update_user(3, "b@example.com", "new-secret")
            .await
            .unwrap();

        assert!(verify_password("new-secret", &updated.password_hash));
        assert!(!verify_password("hunter2", &updated.password_hash));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().times(0);
        let svc = service(mock_repo);

        for (email, password) in [("", "pw"), ("not-an-email", "pw"), ("a@example.com", "")] {
            let result = svc.register(email, password).await;
            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_login_issues_tokens_and_stores_digest() {
        let mut mock_repo = MockUserRepository::new();
        let stored = user(5, "a@example.com", "hunter2");
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        mock_repo
            .expect_set_refresh_token()
            .withf(|id, hash, expires_at| *id == 5 && hash.len() == 64 && *expires_at > Utc::now())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let svc = service(mock_repo);
        let session = svc.login("a@example.com", "hunter2").await.unwrap();

        assert_eq!(session.user.id, 5);
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.refresh_token.len(), 64);
        assert_eq!(
            svc.issuer.verify(&session.access_token).unwrap().user_id(),
            Some(5)
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let stored = user(5, "a@example.com", "hunter2");
        mock_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));
        mock_repo.expect_set_refresh_token().times(0);

        let result = service(mock_repo).login("a@example.com", "wrong").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let result = service(mock_repo).login("nobody@example.com", "pw").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_refresh_with_live_token() {
        let signer = RefreshTokenSigner::new(SECRET);
        let expected_hash = signer.digest("raw-refresh-token");

        let mut stored = user(5, "a@example.com", "hunter2");
        stored.refresh_token_hash = Some(expected_hash.clone());
        stored.refresh_token_expires_at = Some(Utc::now() + chrono::Duration::days(1));

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_refresh_token()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let svc = service(mock_repo);
        let access = svc.refresh("raw-refresh-token").await.unwrap();

        assert_eq!(svc.issuer.verify(&access.token).unwrap().user_id(), Some(5));
    }

    #[tokio::test]
    async fn test_refresh_with_expired_token() {
        let mut stored = user(5, "a@example.com", "hunter2");
        stored.refresh_token_hash = Some("digest".to_string());
        stored.refresh_token_expires_at = Some(Utc::now() - chrono::Duration::seconds(1));

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_refresh_token()
            .returning(move |_| Ok(Some(stored.clone())));

        let result = service(mock_repo).refresh("raw-refresh-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_refresh_with_unknown_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_refresh_token()
            .returning(|_| Ok(None));

        let result = service(mock_repo).refresh("raw-refresh-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let mut mock_repo = MockUserRepository::new();
        let stored = user(9, "b@example.com", "pw");
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 9)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let svc = service(mock_repo);
        let token = svc.issue_access_token(9).unwrap().token;

        assert_eq!(svc.authenticate(&token).await.unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().times(0);

        let result = service(mock_repo).authenticate("garbage").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(mock_repo);
        let token = svc.issue_access_token(9).unwrap().token;

        assert!(matches!(
            svc.authenticate(&token).await,
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_refresh_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_clear_refresh_token()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(mock_repo).logout(5).await.is_ok());
    }
}
