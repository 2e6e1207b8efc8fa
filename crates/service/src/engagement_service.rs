use models::{item, item_comment, item_rating};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::ServiceError;

pub const ALREADY_RATED: &str = "user already rated this item";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub id: i32,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResult {
    pub id: i32,
    pub comment: String,
}

async fn ensure_item(db: &DatabaseConnection, item_id: i32) -> Result<(), ServiceError> {
    item::Entity::find_by_id(item_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("item"))
}

/// One rating per (item, user); a second attempt is a conflict.
#[instrument(skip(db))]
pub async fn rate_item(db: &DatabaseConnection, item_id: i32, user_id: i32, rating: f64) -> Result<RatingResult, ServiceError> {
    ensure_item(db, item_id).await?;
    item_rating::validate_rating(rating)?;
    if item_rating::find_by_item_and_user(db, item_id, user_id).await?.is_some() {
        return Err(ServiceError::Conflict(ALREADY_RATED.into()));
    }
    // a concurrent duplicate still trips the unique index and maps to Conflict
    let created = item_rating::create(db, item_id, user_id, rating).await?;
    info!(item_id, user_id, rating_id = created.id, "item_rated");
    Ok(RatingResult { id: created.id, rating: created.rating })
}

#[instrument(skip(db, comment))]
pub async fn comment_item(db: &DatabaseConnection, item_id: i32, user_id: i32, comment: &str) -> Result<CommentResult, ServiceError> {
    ensure_item(db, item_id).await?;
    let created = item_comment::create(db, item_id, user_id, comment).await?;
    info!(item_id, user_id, comment_id = created.id, "item_commented");
    Ok(CommentResult { id: created.id, comment: created.comment })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_service::get_item;
    use crate::test_support::{get_db, seed_item, seed_user};
    use models::role;

    #[tokio::test]
    async fn second_rating_by_same_user_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seller = seed_user(&db, "A", "a@example.com", role::SELLER).await?;
        let buyer = seed_user(&db, "B", "b@example.com", role::CUSTOMER).await?;
        let widget = seed_item(&db, seller.id, "Widget", 9.99).await?;

        let first = rate_item(&db, widget.id, buyer.id, 5.0).await?;
        assert_eq!(first.rating, 5.0);
        match rate_item(&db, widget.id, buyer.id, 5.0).await {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, ALREADY_RATED),
            other => panic!("unexpected: {:?}", other),
        }

        let detail = get_item(&db, widget.id).await?.expect("item exists");
        assert_eq!(detail.summary.avg_rating, 5.0);
        Ok(())
    }

    #[tokio::test]
    async fn unique_index_backs_the_precheck() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seller = seed_user(&db, "A", "a@example.com", role::SELLER).await?;
        let widget = seed_item(&db, seller.id, "Widget", 1.0).await?;
        item_rating::create(&db, widget.id, seller.id, 3.0).await?;
        let dup = item_rating::create(&db, widget.id, seller.id, 4.0).await;
        assert!(matches!(ServiceError::from(dup.unwrap_err()), ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn missing_item_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let user = seed_user(&db, "A", "a@example.com", role::CUSTOMER).await?;
        assert!(matches!(rate_item(&db, 999, user.id, 1.0).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(comment_item(&db, 999, user.id, "hi").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn negative_rating_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seller = seed_user(&db, "A", "a@example.com", role::SELLER).await?;
        let widget = seed_item(&db, seller.id, "Widget", 1.0).await?;
        assert!(matches!(rate_item(&db, widget.id, seller.id, -1.0).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn comments_are_unbounded_per_user() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seller = seed_user(&db, "A", "a@example.com", role::SELLER).await?;
        let widget = seed_item(&db, seller.id, "Widget", 1.0).await?;
        let one = comment_item(&db, widget.id, seller.id, "nice").await?;
        let two = comment_item(&db, widget.id, seller.id, "nice").await?;
        assert_ne!(one.id, two.id);
        assert_eq!(two.comment, "nice");
        assert!(matches!(comment_item(&db, widget.id, seller.id, "   ").await, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
