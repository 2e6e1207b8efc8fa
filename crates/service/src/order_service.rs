use models::{item, order};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: i32,
    pub status: String,
}

impl From<order::Model> for OrderResult {
    fn from(o: order::Model) -> Self { Self { id: o.id, status: o.status } }
}

#[instrument(skip(db))]
pub async fn purchase(db: &DatabaseConnection, item_id: i32, user_id: i32) -> Result<OrderResult, ServiceError> {
    item::Entity::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("item"))?;
    let created = order::create(db, item_id, user_id).await?;
    info!(order_id = created.id, item_id, user_id, "order_placed");
    Ok(created.into())
}

/// Overwrite the status with any non-blank value.
#[instrument(skip(db))]
pub async fn set_status(db: &DatabaseConnection, order_id: i32, status: &str) -> Result<OrderResult, ServiceError> {
    order::validate_status(status)?;
    let existing = find_order(db, order_id).await?.ok_or_else(|| ServiceError::not_found("order"))?;
    let updated = order::set_status(db, existing, status.trim()).await?;
    info!(order_id, status = %updated.status, "order_status_changed");
    Ok(updated.into())
}

pub async fn find_order(db: &DatabaseConnection, order_id: i32) -> Result<Option<order::Model>, ServiceError> {
    Ok(order::Entity::find_by_id(order_id).one(db).await?)
}

/// Load an order for `user_id`; someone else's order is `Forbidden`.
pub async fn find_owned_order(db: &DatabaseConnection, order_id: i32, user_id: i32) -> Result<order::Model, ServiceError> {
    let found = find_order(db, order_id).await?.ok_or_else(|| ServiceError::not_found("order"))?;
    if found.user_id != user_id {
        return Err(ServiceError::Forbidden("You have not access".into()));
    }
    Ok(found)
}

/// Caller must already have checked ownership.
#[instrument(skip(db, order), fields(order_id = order.id))]
pub async fn cancel(db: &DatabaseConnection, order: order::Model) -> Result<OrderResult, ServiceError> {
    let updated = order::set_status(db, order, order::STATUS_CANCELED).await?;
    info!(order_id = updated.id, user_id = updated.user_id, "order_canceled");
    Ok(updated.into())
}

pub async fn list_orders_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<order::Model>, ServiceError> {
    let orders = order::Entity::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;
    Ok(orders)
}
