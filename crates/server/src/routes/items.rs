use axum::{extract::State, Extension, Json};
use common::types::{envelope, ResponseStatus};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use service::auth::domain::AuthUser;
use service::catalog_service::{self, ItemDetail, ItemFilter, ItemPatch};
use service::{engagement_service, order_service};

use crate::auth::ServerState;
use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam, QueryParams};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Minimum average rating (inclusive).
    pub rating_gte: Option<f64>,
    pub rating_lte: Option<f64>,
    /// Minimum price (inclusive).
    pub price_gte: Option<f64>,
    pub price_lte: Option<f64>,
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
}

impl From<ItemQuery> for ItemFilter {
    fn from(q: ItemQuery) -> Self {
        ItemFilter {
            rating_gte: q.rating_gte,
            rating_lte: q.rating_lte,
            price_gte: q.price_gte,
            price_lte: q.price_lte,
            search: q.search,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct RatingInput {
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct CommentInput {
    pub comment: String,
}

fn success(payload: Value) -> Json<Value> {
    Json(envelope(ResponseStatus::Success, payload))
}

#[utoipa::path(
    get, path = "/api/items", tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Items ordered by id", body = [crate::openapi::ItemSummaryDoc]),
        (status = 400, description = "Malformed filter")
    )
)]
pub async fn list(State(state): State<ServerState>, QueryParams(q): QueryParams<ItemQuery>) -> Result<Json<Value>, ApiError> {
    let items = catalog_service::list_items(&state.db, &q.into()).await?;
    Ok(success(json!({ "items": items })))
}

/// Unknown ids answer 200 with a zero-valued item.
#[utoipa::path(
    get, path = "/api/items/{id}", tag = "items",
    params(("id" = i32, Path, description = "Item id")),
    responses((status = 200, description = "Item detail with comments", body = crate::openapi::ItemDetailDoc))
)]
pub async fn get(State(state): State<ServerState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    let detail = catalog_service::get_item(&state.db, id).await?.unwrap_or_else(ItemDetail::default);
    Ok(success(json!({ "item": detail })))
}

#[utoipa::path(
    post, path = "/api/items", tag = "items",
    request_body = crate::openapi::ItemRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Seller role required")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(input): JsonBody<CreateItemInput>,
) -> Result<Json<Value>, ApiError> {
    let item = catalog_service::create_item(&state.db, user.id, &input.name, input.price).await?;
    Ok(success(json!({ "item": item })))
}

#[utoipa::path(
    put, path = "/api/items/{id}", tag = "items",
    params(("id" = i32, Path, description = "Item id")),
    request_body = crate::openapi::ItemPatchRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Invalid patch or unknown item")),
    security(("bearer" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<i32>,
    JsonBody(patch): JsonBody<ItemPatch>,
) -> Result<Json<Value>, ApiError> {
    let item = catalog_service::update_item(&state.db, id, patch).await?;
    if item.seller_id != user.id {
        // TODO: decide whether only the seller may edit; any signed-in user can today
        warn!(item_id = id, user_id = user.id, seller_id = item.seller_id, "item updated by non-owner");
    }
    Ok(success(json!({ "item": item })))
}

#[utoipa::path(
    delete, path = "/api/items/{id}", tag = "items",
    params(("id" = i32, Path, description = "Item id")),
    responses((status = 200, description = "Deleted"), (status = 400, description = "item not found"))
)]
pub async fn delete(State(state): State<ServerState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    catalog_service::delete_item(&state.db, id).await?;
    Ok(success(Value::Null))
}

#[utoipa::path(
    post, path = "/api/items/rating/{id}", tag = "items",
    params(("id" = i32, Path, description = "Item id")),
    request_body = crate::openapi::RatingRequest,
    responses((status = 200, description = "Rated"), (status = 400, description = "Unknown item or already rated")),
    security(("bearer" = []))
)]
pub async fn rate(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<RatingInput>,
) -> Result<Json<Value>, ApiError> {
    let rating = engagement_service::rate_item(&state.db, id, user.id, input.rating).await?;
    Ok(success(json!({ "item_rating": rating })))
}

#[utoipa::path(
    post, path = "/api/items/comment/{id}", tag = "items",
    params(("id" = i32, Path, description = "Item id")),
    request_body = crate::openapi::CommentRequest,
    responses((status = 200, description = "Commented"), (status = 400, description = "Unknown item or blank comment")),
    security(("bearer" = []))
)]
pub async fn comment(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<CommentInput>,
) -> Result<Json<Value>, ApiError> {
    let comment = engagement_service::comment_item(&state.db, id, user.id, &input.comment).await?;
    Ok(success(json!({ "item_comment": comment })))
}

#[utoipa::path(
    post, path = "/api/items/{id}/purchase", tag = "orders",
    params(("id" = i32, Path, description = "Item id")),
    responses((status = 200, description = "Order placed as pending"), (status = 400, description = "Unknown item")),
    security(("bearer" = []))
)]
pub async fn purchase(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Value>, ApiError> {
    let order = order_service::purchase(&state.db, id, user.id).await?;
    Ok(success(json!({ "order": order })))
}
