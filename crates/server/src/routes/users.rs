use axum::{extract::State, Extension, Json};
use common::types::{envelope, ResponseStatus};
use serde_json::{json, Value};

use service::auth::domain::AuthUser;
use service::order_service;

use crate::auth::{OwnedOrder, ServerState};
use crate::errors::ApiError;

#[utoipa::path(
    get, path = "/api/users/me", tag = "users",
    responses((status = 200, description = "Current user", body = crate::openapi::UserDoc), (status = 401, description = "Not logged in")),
    security(("bearer" = []))
)]
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(envelope(ResponseStatus::Success, json!({ "data": { "user": user } })))
}

#[utoipa::path(
    get, path = "/api/users/me/orders", tag = "users",
    responses((status = 200, description = "Orders placed by the caller")),
    security(("bearer" = []))
)]
pub async fn my_orders(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let orders = order_service::list_orders_for_user(&state.db, user.id).await?;
    Ok(Json(envelope(ResponseStatus::Success, json!({ "orders": orders }))))
}

/// `:user_id` is informational; ownership is checked against the caller.
#[utoipa::path(
    post, path = "/api/users/{user_id}/orders/{order_id}/cancel", tag = "users",
    params(
        ("user_id" = i32, Path, description = "Caller id"),
        ("order_id" = i32, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Canceled"),
        (status = 400, description = "Unknown order"),
        (status = 403, description = "Order belongs to someone else")
    ),
    security(("bearer" = []))
)]
pub async fn cancel_order(
    State(state): State<ServerState>,
    Extension(OwnedOrder(order)): Extension<OwnedOrder>,
) -> Result<Json<Value>, ApiError> {
    let order = order_service::cancel(&state.db, order).await?;
    Ok(Json(envelope(ResponseStatus::Success, json!({ "order": order }))))
}
