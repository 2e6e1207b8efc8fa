use chrono::Utc;
use models::errors::ModelError;
use models::{item, item_comment, item_rating, order, user};
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;

/// One row of the item listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct ItemSummary {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub seller_name: String,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct ItemDetailComment {
    pub comment: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub summary: ItemSummary,
    pub comments: Vec<ItemDetailComment>,
}

/// Conjunctive listing filters; bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemFilter {
    pub rating_gte: Option<f64>,
    pub rating_lte: Option<f64>,
    pub price_gte: Option<f64>,
    pub price_lte: Option<f64>,
    pub search: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
}

fn avg_rating_expr() -> SimpleExpr {
    Func::coalesce([
        SimpleExpr::from(Func::avg(Expr::col((item_rating::Entity, item_rating::Column::Rating)))),
        SimpleExpr::from(Expr::val(0.0f64)),
    ])
    .into()
}

fn summary_query() -> sea_orm::Select<item::Entity> {
    item::Entity::find()
        .select_only()
        .column(item::Column::Id)
        .column(item::Column::Name)
        .column(item::Column::Price)
        .column_as(user::Column::Name, "seller_name")
        .column_as(avg_rating_expr(), "avg_rating")
        .join(JoinType::InnerJoin, item::Relation::Seller.def())
        .join(JoinType::LeftJoin, item::Relation::Ratings.def())
        .group_by(item::Column::Id)
        .group_by(item::Column::Name)
        .group_by(item::Column::Price)
        .group_by(user::Column::Name)
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[instrument(skip(db))]
pub async fn list_items(db: &DatabaseConnection, filter: &ItemFilter) -> Result<Vec<ItemSummary>, ServiceError> {
    let mut query = summary_query();

    if let Some(min) = filter.price_gte {
        query = query.filter(item::Column::Price.gte(min));
    }
    if let Some(max) = filter.price_lte {
        query = query.filter(item::Column::Price.lte(max));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = LikeExpr::new(format!("%{}%", escape_like(&search.to_lowercase()))).escape('\\');
        query = query.filter(Expr::expr(Func::lower(Expr::col((item::Entity, item::Column::Name)))).like(pattern));
    }
    if let Some(min) = filter.rating_gte {
        query = query.having(Expr::expr(avg_rating_expr()).gte(min));
    }
    if let Some(max) = filter.rating_lte {
        query = query.having(Expr::expr(avg_rating_expr()).lte(max));
    }

    let items = query
        .order_by_asc(item::Column::Id)
        .into_model::<ItemSummary>()
        .all(db)
        .await?;
    Ok(items)
}

/// Summary plus comments (newest first); `None` when the item is unknown.
#[instrument(skip(db))]
pub async fn get_item(db: &DatabaseConnection, id: i32) -> Result<Option<ItemDetail>, ServiceError> {
    let summary = summary_query()
        .filter(item::Column::Id.eq(id))
        .into_model::<ItemSummary>()
        .one(db)
        .await?;
    let Some(summary) = summary else {
        return Ok(None);
    };

    let comments = item_comment::Entity::find()
        .select_only()
        .column(item_comment::Column::Comment)
        .column_as(user::Column::Email, "email")
        .join(JoinType::InnerJoin, item_comment::Relation::User.def())
        .filter(item_comment::Column::ItemId.eq(id))
        .order_by_desc(item_comment::Column::CreatedAt)
        .order_by_desc(item_comment::Column::Id)
        .into_model::<ItemDetailComment>()
        .all(db)
        .await?;

    Ok(Some(ItemDetail { summary, comments }))
}

#[instrument(skip(db))]
pub async fn create_item(db: &DatabaseConnection, seller_id: i32, name: &str, price: f64) -> Result<item::Model, ServiceError> {
    let created = item::create(db, seller_id, name, price).await?;
    info!(item_id = created.id, seller_id, "item_created");
    Ok(created)
}

#[instrument(skip(db))]
pub async fn update_item(db: &DatabaseConnection, id: i32, patch: ItemPatch) -> Result<item::Model, ServiceError> {
    let existing = item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("item"))?;

    let mut am: item::ActiveModel = existing.into();
    if let Some(name) = patch.name.as_deref() {
        item::validate_name(name)?;
        am.name = Set(name.trim().to_string());
    }
    if let Some(price) = patch.price {
        item::validate_price(price)?;
        am.price = Set(price);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(item_id = updated.id, "item_updated");
    Ok(updated)
}

const ITEM_HAS_ORDERS: &str = "item has orders and cannot be deleted";

/// Removes the item with its ratings and comments. Items that were ordered stay.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let existing = item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("item"))?;
    let orders = order::Entity::find().filter(order::Column::ItemId.eq(id)).count(db).await?;
    if orders > 0 {
        return Err(ServiceError::Conflict(ITEM_HAS_ORDERS.to_string()));
    }
    let res = existing
        .delete(db)
        .await
        .map_err(|e| ModelError::from_db(e, ITEM_HAS_ORDERS))?;
    if res.rows_affected != 1 {
        warn!(item_id = id, rows = res.rows_affected, "unexpected delete count");
    }
    info!(item_id = id, "item_deleted");
    Ok(())
}
