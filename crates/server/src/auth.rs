use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use service::auth::domain::AuthUser;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::order_service;

use crate::errors::ApiError;
use crate::extract::PathParam;

pub const TOKEN_COOKIE: &str = "token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub token_secret: String,
    pub token_max_age_minutes: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub auth_service: Arc<AuthService<SeaOrmAuthRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &configs::AuthConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let auth_service = AuthService::new(
            repo,
            AuthConfig {
                token_secret: cfg.token_secret.clone(),
                token_ttl: chrono::Duration::minutes(cfg.token_expires_in_minutes),
            },
        );
        Self {
            db,
            auth: ServerAuthConfig {
                token_secret: cfg.token_secret.clone(),
                token_max_age_minutes: cfg.token_max_age_minutes,
            },
            auth_service: Arc::new(auth_service),
        }
    }
}

/// Order resolved by [`require_order_owner`]; always belongs to the caller.
#[derive(Clone, Debug)]
pub struct OwnedOrder(pub models::order::Model);

/// `Authorization: Bearer` wins over the `token` cookie.
fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Result<String, ApiError> {
    if let Some(authz) = headers.get(header::AUTHORIZATION) {
        let value = authz
            .to_str()
            .map_err(|_| ApiError::Unauthorized("invalid Authorization header".into()))?;
        return match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => {
                tracing::warn!("invalid Authorization format (expect Bearer)");
                Err(ApiError::Unauthorized("invalid Authorization header".into()))
            }
        };
    }
    match jar.get(TOKEN_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => Ok(cookie.value().to_string()),
        _ => Err(ApiError::Unauthorized("You are not logged in".into())),
    }
}

/// Resolve the caller and attach it as `Extension<AuthUser>`.
pub async fn require_user(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers(), &jar)?;
    let user = state.auth_service.authenticate(&token).await.map_err(|e| {
        tracing::debug!(path = %req.uri().path(), error = %e, "token rejected");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn current_user(req: &Request) -> Result<&AuthUser, ApiError> {
    req.extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::Unauthorized("You are not logged in".into()))
}

/// Must run inside [`require_user`].
pub async fn require_role(role: &'static str, req: Request, next: Next) -> Result<Response, ApiError> {
    let user = current_user(&req)?;
    if !user.has_role(role) {
        tracing::info!(user_id = user.id, role = %user.role, required = role, "role check failed");
        return Err(ApiError::Forbidden("You have not access".into()));
    }
    Ok(next.run(req).await)
}

pub async fn require_seller(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role(models::role::SELLER, req, next).await
}

#[derive(Debug, Deserialize)]
pub struct OrderPath {
    pub order_id: i32,
}

/// Load the `:order_id` order and reject callers who did not place it.
pub async fn require_order_owner(
    State(state): State<ServerState>,
    PathParam(path): PathParam<OrderPath>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = current_user(&req)?.id;
    let order = order_service::find_owned_order(&state.db, path.order_id, user_id).await?;
    req.extensions_mut().insert(OwnedOrder(order));
    Ok(next.run(req).await)
}
