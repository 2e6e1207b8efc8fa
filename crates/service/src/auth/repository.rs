use async_trait::async_trait;

use super::domain::{AuthUser, Credentials, NewUser, Role};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AuthError>;

    /// `email` is already normalized (trimmed, lower-cased).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, user: NewUser) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{DateTime, FixedOffset, Utc};

    pub struct MockAuthRepository {
        roles: Vec<Role>,
        users: Mutex<HashMap<i32, AuthUser>>,  // key: user id
        creds: Mutex<HashMap<i32, Credentials>>, // key: user id
    }

    impl Default for MockAuthRepository {
        fn default() -> Self {
            Self {
                roles: vec![
                    Role { id: 1, name: models::role::CUSTOMER.into() },
                    Role { id: 2, name: models::role::SELLER.into() },
                ],
                users: Mutex::new(HashMap::new()),
                creds: Mutex::new(HashMap::new()),
            }
        }
    }

    fn poisoned<T>(_: T) -> AuthError {
        AuthError::Repository("mock repository lock poisoned".into())
    }

    impl MockAuthRepository {
        /// Drop a user while keeping any token issued for it valid.
        pub fn remove_user(&self, id: i32) {
            if let Ok(mut users) = self.users.lock() {
                users.remove(&id);
            }
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AuthError> {
            Ok(self.roles.iter().find(|r| r.name == name).cloned())
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().map_err(poisoned)?;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().map_err(poisoned)?;
            Ok(users.get(&id).cloned())
        }

        async fn create_user(&self, user: NewUser) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().map_err(poisoned)?;
            if users.values().any(|u| u.email == user.email) {
                return Err(AuthError::Conflict("user with that email already exists".into()));
            }
            let id = users.keys().max().copied().unwrap_or(0) + 1;
            let now: DateTime<FixedOffset> = Utc::now().into();
            let created = AuthUser {
                id,
                name: user.name,
                email: user.email,
                role: user.role.name,
                created_at: now,
                updated_at: now,
            };
            users.insert(id, created.clone());
            drop(users);

            let mut creds = self.creds.lock().map_err(poisoned)?;
            creds.insert(id, Credentials { user_id: id, password_hash: user.password_hash });
            Ok(created)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().map_err(poisoned)?;
            Ok(creds.get(&user_id).cloned())
        }
    }
}
