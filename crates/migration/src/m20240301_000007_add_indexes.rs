use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Items: listing joins on seller
        manager
            .create_index(
                Index::create()
                    .name("idx_items_seller")
                    .table(Item::Table)
                    .col(Item::SellerId)
                    .to_owned(),
            )
            .await?;

        // Ratings: one per (item, user)
        manager
            .create_index(
                Index::create()
                    .name("uniq_item_ratings_item_user")
                    .table(ItemRating::Table)
                    .col(ItemRating::ItemId)
                    .col(ItemRating::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_comments_item")
                    .table(ItemComment::Table)
                    .col(ItemComment::ItemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user")
                    .table(Order::Table)
                    .col(Order::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_items_seller").table(Item::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_item_ratings_item_user").table(ItemRating::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_item_comments_item").table(ItemComment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_user").table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Item { #[sea_orm(iden = "items")] Table, SellerId }

#[derive(DeriveIden)]
enum ItemRating { #[sea_orm(iden = "item_ratings")] Table, ItemId, UserId }

#[derive(DeriveIden)]
enum ItemComment { #[sea_orm(iden = "item_comments")] Table, ItemId }

#[derive(DeriveIden)]
enum Order { #[sea_orm(iden = "orders")] Table, UserId }
