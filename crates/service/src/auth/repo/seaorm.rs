use sea_orm::{DatabaseConnection, EntityTrait};

use crate::auth::domain::{AuthUser, Credentials, NewUser, Role};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

#[derive(Clone)]
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn role_name(&self, role_id: i32) -> Result<String, AuthError> {
        let role = models::role::Entity::find_by_id(role_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        role.map(|r| r.name)
            .ok_or_else(|| AuthError::Repository(format!("role {} is missing", role_id)))
    }
}

fn to_auth_user(u: models::user::Model, role: String) -> AuthUser {
    AuthUser { id: u.id, name: u.name, email: u.email, role, created_at: u.created_at, updated_at: u.updated_at }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AuthError> {
        let res = models::role::find_by_name(&self.db, name).await?;
        Ok(res.map(|r| Role { id: r.id, name: r.name }))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        match models::user::find_by_email(&self.db, email).await? {
            Some(u) => {
                let role = self.role_name(u.role_id).await?;
                Ok(Some(to_auth_user(u, role)))
            }
            None => Ok(None),
        }
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .find_also_related(models::role::Entity)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|(u, r)| {
            let role = r.map(|r| r.name).unwrap_or_default();
            to_auth_user(u, role)
        }))
    }

    async fn create_user(&self, user: NewUser) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, &user.name, &user.email, &user.password_hash, user.role.id).await?;
        Ok(to_auth_user(created, user.role.name))
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password }))
    }
}
