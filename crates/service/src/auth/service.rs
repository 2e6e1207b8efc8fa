use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, NewUser, SignInInput, SignUpInput};
use super::errors::AuthError;
use super::password::{hash_password, verify_password};
use super::repository::AuthRepository;
use super::token::{issue_token, validate_token};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl: Duration,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::SignUpInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { token_secret: "secret".into(), token_ttl: chrono::Duration::minutes(60) });
    /// let input = SignUpInput {
    ///     name: "Test".into(),
    ///     email: "User@Example.com".into(),
    ///     password: "Secret123".into(),
    ///     password_confirm: "Secret123".into(),
    ///     role: None,
    /// };
    /// let user = tokio_test::block_on(svc.sign_up(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// assert_eq!(user.role, "customer");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn sign_up(&self, input: SignUpInput) -> Result<AuthUser, AuthError> {
        models::user::validate_name(&input.name)?;
        models::user::validate_email(&input.email)?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={})", MIN_PASSWORD_LEN)));
        }
        if input.password != input.password_confirm {
            return Err(AuthError::Validation("Passwords do not match".into()));
        }

        let role_name = input.role.as_deref().map(str::trim).unwrap_or(models::role::CUSTOMER);
        let role = self
            .repo
            .find_role_by_name(role_name)
            .await?
            .ok_or_else(|| AuthError::Validation(format!("unknown role: {}", role_name)))?;

        let email = models::user::normalize_email(&input.email);
        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict("user with that email already exists".into()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(NewUser { name: input.name.trim().to_string(), email, password_hash, role })
            .await?;
        info!(user_id = user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(user)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{SignUpInput, SignInInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { token_secret: "secret".into(), token_ttl: chrono::Duration::minutes(60) });
    /// let _ = tokio_test::block_on(svc.sign_up(SignUpInput {
    ///     name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into(),
    ///     password_confirm: "Passw0rd".into(), role: Some("seller".into()),
    /// }));
    /// let session = tokio_test::block_on(svc.sign_in(SignInInput { email: "U@E.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.role, "seller");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn sign_in(&self, input: SignInInput) -> Result<AuthSession, AuthError> {
        let email = models::user::normalize_email(&input.email);
        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(&cred.password_hash, &input.password)?;

        let token = issue_token(user.id, &self.cfg.token_secret, self.cfg.token_ttl)?;
        info!(user_id = user.id, "user_signed_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve the user a session token belongs to.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let user_id = validate_token(token, &self.cfg.token_secret)?;
        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::Unauthorized("the user belonging to this token no longer exists".into()))
    }
}
