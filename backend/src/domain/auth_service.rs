//! Authentication and session management.
//!
//! Bearer tokens are random UUIDs stored server-side; presenting a valid
//! token on the Authorization header identifies the user. Password handling
//! is deliberately minimal (opaque string comparison).

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Session, User};
use shared::{LoginRequest, RegisterRequest};

const MIN_PASSWORD_LEN: usize = 4;
const MAX_USERNAME_LEN: usize = 64;

#[derive(Clone)]
pub struct AuthService {
    db: DbConnection,
}

impl AuthService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Register a new user and log them straight in.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<(User, Session)> {
        let username = request.username.trim().to_string();
        if username.is_empty() || username.len() > MAX_USERNAME_LEN {
            return Err(DomainError::Validation(format!(
                "Username must be between 1 and {} characters",
                MAX_USERNAME_LEN
            )));
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.db.get_user_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            password: request.password,
            created_at: Utc::now().to_rfc3339(),
        };
        self.db.create_user(&user).await?;
        info!("Registered user {}", user.username);

        let session = self.open_session(&user).await?;
        Ok((user, session))
    }

    /// Verify credentials and mint a new session token.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<(User, Session)> {
        let user = self
            .db
            .get_user_by_username(request.username.trim())
            .await?
            .ok_or(DomainError::Unauthorized)?;
        if user.password != request.password {
            return Err(DomainError::Unauthorized);
        }

        let session = self.open_session(&user).await?;
        info!("User {} logged in", user.username);
        Ok((user, session))
    }

    /// Delete the session behind a token. Idempotent.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.db.delete_session(token).await?;
        Ok(())
    }

    /// Resolve a bearer token to its user, or reject.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let session = self
            .db
            .get_session(token)
            .await?
            .ok_or(DomainError::Unauthorized)?;
        self.db
            .get_user(&session.user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    async fn open_session(&self, user: &User) -> DomainResult<Session> {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.db.create_session(&session).await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> AuthService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        AuthService::new(db)
    }

    fn register_request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let service = create_test_service().await;
        let (user, session) = service
            .register(register_request("alice", "hunter2"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");

        let authenticated = service.authenticate(&session.token).await.unwrap();
        assert_eq!(authenticated.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let service = create_test_service().await;
        service.register(register_request("alice", "hunter2")).await.unwrap();

        let result = service.register(register_request("alice", "other")).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let service = create_test_service().await;
        assert!(matches!(
            service.register(register_request("", "hunter2")).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.register(register_request("bob", "abc")).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let service = create_test_service().await;
        service.register(register_request("alice", "hunter2")).await.unwrap();

        let result = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let service = create_test_service().await;
        let (_, session) = service
            .register(register_request("alice", "hunter2"))
            .await
            .unwrap();

        service.logout(&session.token).await.unwrap();
        let result = service.authenticate(&session.token).await;
        assert!(matches!(result, Err(DomainError::Unauthorized)));

        // Logging out again is fine
        service.logout(&session.token).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let service = create_test_service().await;
        let result = service.authenticate("not-a-token").await;
        assert!(matches!(result, Err(DomainError::Unauthorized)));
    }
}
