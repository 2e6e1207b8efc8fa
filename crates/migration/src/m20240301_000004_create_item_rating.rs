use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemRating::Table)
                    .if_not_exists()
                    .col(pk_auto(ItemRating::Id))
                    .col(integer(ItemRating::ItemId).not_null())
                    .col(integer(ItemRating::UserId).not_null())
                    .col(double(ItemRating::Rating).not_null())
                    .col(timestamp_with_time_zone(ItemRating::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_ratings_item")
                            .from(ItemRating::Table, ItemRating::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_ratings_user")
                            .from(ItemRating::Table, ItemRating::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ItemRating::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ItemRating { #[sea_orm(iden = "item_ratings")] Table, Id, ItemId, UserId, Rating, CreatedAt }

#[derive(DeriveIden)]
enum Item { #[sea_orm(iden = "items")] Table, Id }

#[derive(DeriveIden)]
enum User { #[sea_orm(iden = "users")] Table, Id }
