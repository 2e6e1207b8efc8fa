use axum::{extract::State, Json};
use common::types::{envelope, ResponseStatus};
use serde::Deserialize;
use serde_json::{json, Value};

use service::order_service;

use crate::auth::ServerState;
use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam};

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
}

#[utoipa::path(
    post, path = "/api/order/{id}/status", tag = "orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = crate::openapi::StatusRequest,
    responses(
        (status = 200, description = "Status overwritten"),
        (status = 400, description = "Unknown order or blank status"),
        (status = 403, description = "Seller role required")
    ),
    security(("bearer" = []))
)]
pub async fn set_status(
    State(state): State<ServerState>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<StatusInput>,
) -> Result<Json<Value>, ApiError> {
    let order = order_service::set_status(&state.db, id, &input.status).await?;
    Ok(Json(envelope(ResponseStatus::Success, json!({ "order": order }))))
}
