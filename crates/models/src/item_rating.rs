use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, item, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Item,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Item => Entity::belongs_to(item::Entity).from(Column::ItemId).to(item::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl Related<item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: f64) -> Result<(), errors::ModelError> {
    if !rating.is_finite() || rating < 0.0 {
        return Err(errors::ModelError::Validation("rating must be a non-negative number".into()));
    }
    Ok(())
}

pub async fn find_by_item_and_user(db: &DatabaseConnection, item_id: i32, user_id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::ItemId.eq(item_id))
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(errors::ModelError::from)
}

pub async fn create(db: &DatabaseConnection, item_id: i32, user_id: i32, rating: f64) -> Result<Model, errors::ModelError> {
    validate_rating(rating)?;
    let am = ActiveModel {
        item_id: Set(item_id),
        user_id: Set(user_id),
        rating: Set(rating),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::from_db(e, "user already rated this item"))
}
