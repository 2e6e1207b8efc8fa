use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use common::types::{envelope, ResponseStatus};
use serde_json::{json, Value};

use service::auth::domain::{SignInInput, SignUpInput};

use crate::auth::{ServerState, TOKEN_COOKIE};
use crate::errors::ApiError;
use crate::extract::JsonBody;

#[utoipa::path(
    post, path = "/api/auth/signup", tag = "auth",
    request_body = crate::openapi::SignUpRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation failed or email taken")
    )
)]
pub async fn sign_up(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<SignUpInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state.auth_service.sign_up(input).await?;
    Ok((StatusCode::CREATED, Json(envelope(ResponseStatus::Success, Value::Null))))
}

#[utoipa::path(
    post, path = "/api/auth/signin", tag = "auth",
    request_body = crate::openapi::SignInRequest,
    responses(
        (status = 200, description = "Signed in; token also set as cookie"),
        (status = 400, description = "Invalid email or Password")
    )
)]
pub async fn sign_in(
    State(state): State<ServerState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<SignInInput>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let session = state.auth_service.sign_in(input).await?;
    let max_age = state.auth.token_max_age_minutes * 60;
    let cookie = Cookie::parse(format!("{}={}; Max-Age={}; Path=/; HttpOnly", TOKEN_COOKIE, session.token, max_age))
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let jar = jar.add(cookie);
    Ok((jar, Json(envelope(ResponseStatus::Success, json!({ "token": session.token })))))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 200, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let mut cookie = Cookie::from(TOKEN_COOKIE);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();
    let jar = jar.add(cookie);
    (jar, Json(envelope(ResponseStatus::Success, Value::Null)))
}
