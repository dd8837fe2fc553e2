use recipebox_core::User;
use serde::Deserialize;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::token::TokenIssuer;
use crate::db::UserRepository;
use crate::error::{Error, Result};

const INVALID_LOGIN: &str = "Invalid login";

/// Email and plaintext password, as sent to `/users` and `/login`.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Creates an account and returns its id. An email can register once.
    pub async fn register(&self, credentials: Credentials) -> Result<Uuid> {
        let email = credentials.email.trim().to_string();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(Error::validation("Email and password are required"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::validation("Email already registered"));
        }

        let password = credentials.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = User::new(email, password_hash);
        match self.users.create(&user).await {
            Ok(()) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(Error::validation("Email already registered"));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, "registered user");
        Ok(user.id)
    }

    /// Verifies credentials and mints a session token.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, credentials: Credentials) -> Result<String> {
        let email = credentials.email.trim();
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| Error::rejected(INVALID_LOGIN))?;

        let password = credentials.password;
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await?;
        if !valid {
            return Err(Error::rejected(INVALID_LOGIN));
        }

        self.tokens.issue(user.id, &user.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::TempDir;

    struct TestContext {
        service: AuthService,
        _temp_dir: TempDir,
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        TestContext {
            service: AuthService::new(UserRepository::new(pool), TokenIssuer::new("secret")),
            _temp_dir: temp_dir,
        }
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", creds("cook@example.com", "hunter2"));
        assert!(debug.contains("cook@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let ctx = setup().await;
        let id = ctx.service.register(creds("cook@example.com", "pw")).await.unwrap();

        let token = ctx.service.login(creds("cook@example.com", "pw")).await.unwrap();
        let claims = ctx.service.tokens().verify(&token).unwrap();
        assert_eq!(claims.user_id, id);
        assert_eq!(claims.email, "cook@example.com");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let ctx = setup().await;
        ctx.service.register(creds("cook@example.com", "pw")).await.unwrap();

        let wrong = ctx.service.login(creds("cook@example.com", "nope")).await.unwrap_err();
        let unknown = ctx.service.login(creds("ghost@example.com", "pw")).await.unwrap_err();

        assert!(matches!(wrong, Error::Rejected(_)));
        assert!(matches!(unknown, Error::Rejected(_)));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_refused() {
        let ctx = setup().await;
        ctx.service.register(creds("cook@example.com", "pw")).await.unwrap();

        let err = ctx.service.register(creds("cook@example.com", "other")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Email already registered"));
    }

    #[tokio::test]
    async fn test_blank_credentials_are_refused() {
        let ctx = setup().await;
        let err = ctx.service.register(creds("  ", "pw")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = ctx.service.register(creds("cook@example.com", "")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
