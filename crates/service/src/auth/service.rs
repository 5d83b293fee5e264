use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token;
use crate::identity::UserRole;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    /// Lowercased emails that register as ADMIN
    pub admin_emails: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, token_ttl_hours: 12, admin_emails: Vec::new() }
    }
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self {
            jwt_secret: Some(c.jwt_secret.clone()).filter(|s| !s.is_empty()),
            token_ttl_hours: c.token_ttl_hours,
            admin_emails: c.admin_emails.clone(),
        }
    }
}

fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        let email = normalize_email(&input.email);
        models::user::validate_email(&email).map_err(|e| AuthError::Validation(e.to_string()))?;
        models::user::validate_name(&input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        if input.password.chars().count() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let role = if self.cfg.admin_emails.iter().any(|a| *a == email) { UserRole::Admin } else { UserRole::User };
        let user = self.repo.create_user_with_password(&email, input.name.trim(), role, hash).await?;
        info!(user_id = %user.id, email = %user.email, role = ?user.role, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("secret".into()), ..AuthConfig::default() });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = match &self.cfg.jwt_secret {
            Some(secret) => Some(token::issue(secret, &user, self.cfg.token_ttl_hours)?),
            None => None,
        };
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::Credentials;
    use crate::auth::repository::mock::MockAuthRepository;
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    /// Fails the next user write, then behaves like the in-memory repository.
    #[derive(Default)]
    struct FailOnceRepository {
        inner: MockAuthRepository,
        fail_next: AtomicBool,
    }

    #[async_trait::async_trait]
    impl AuthRepository for FailOnceRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            self.inner.find_user_by_email(email).await
        }

        async fn create_user_with_password(&self, email: &str, name: &str, role: UserRole, password_hash: String) -> Result<AuthUser, AuthError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(AuthError::Repository("connection reset".into()));
            }
            self.inner.create_user_with_password(email, name, role, password_hash).await
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            self.inner.get_credentials(user_id).await
        }
    }

    fn svc(admins: &[&str]) -> AuthService<MockAuthRepository> {
        let cfg = AuthConfig {
            jwt_secret: Some("unit-secret".into()),
            admin_emails: admins.iter().map(|s| s.to_string()).collect(),
            ..AuthConfig::default()
        };
        AuthService::new(Arc::new(MockAuthRepository::default()), cfg)
    }

    fn reg(email: &str, password: &str) -> RegisterInput {
        RegisterInput { email: email.into(), name: "Student".into(), password: password.into() }
    }

    #[tokio::test]
    async fn admin_emails_get_admin_role() {
        let s = svc(&["dean@school.edu"]);
        let admin = s.register(reg("Dean@School.edu", "longenough")).await.unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.email, "dean@school.edu");
        let plain = s.register(reg("kim@school.edu", "longenough")).await.unwrap();
        assert_eq!(plain.role, UserRole::User);
    }

    #[tokio::test]
    async fn register_rejects_bad_input_and_duplicates() {
        let s = svc(&[]);
        assert!(matches!(s.register(reg("kim@school.edu", "short")).await, Err(AuthError::Validation(_))));
        assert!(matches!(s.register(reg("no-at-sign", "longenough")).await, Err(AuthError::Validation(_))));
        s.register(reg("kim@school.edu", "longenough")).await.unwrap();
        assert!(matches!(s.register(reg("kim@school.edu", "longenough")).await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn login_issues_token_carrying_role() {
        let s = svc(&["dean@school.edu"]);
        let u = s.register(reg("dean@school.edu", "longenough")).await.unwrap();
        let session = s.login(LoginInput { email: "dean@school.edu".into(), password: "longenough".into() }).await.unwrap();
        let claims = token::verify("unit-secret", session.token.as_deref().unwrap()).unwrap();
        assert_eq!(claims.uid, u.id);
        assert!(claims.actor().is_admin());
    }

    #[tokio::test]
    async fn failed_registration_can_be_retried() {
        let repo = Arc::new(FailOnceRepository { fail_next: AtomicBool::new(true), ..FailOnceRepository::default() });
        let s = AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("unit-secret".into()), ..AuthConfig::default() });

        assert!(matches!(s.register(reg("kim@school.edu", "longenough")).await, Err(AuthError::Repository(_))));
        assert!(repo.find_user_by_email("kim@school.edu").await.unwrap().is_none());

        let user = s.register(reg("kim@school.edu", "longenough")).await.unwrap();
        let cred = repo.get_credentials(user.id).await.unwrap().unwrap();
        assert!(cred.password_hash.starts_with("$argon2"));
        let session = s.login(LoginInput { email: "kim@school.edu".into(), password: "longenough".into() }).await.unwrap();
        assert_eq!(session.user.id, user.id);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_user() {
        let s = svc(&[]);
        s.register(reg("kim@school.edu", "longenough")).await.unwrap();
        let wrong = s.login(LoginInput { email: "kim@school.edu".into(), password: "nope-nope".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));
        let unknown = s.login(LoginInput { email: "ghost@school.edu".into(), password: "longenough".into() }).await;
        assert!(matches!(unknown, Err(AuthError::Unauthorized)));
    }
}
