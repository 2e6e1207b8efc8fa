use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemComment::Table)
                    .if_not_exists()
                    .col(pk_auto(ItemComment::Id))
                    .col(integer(ItemComment::ItemId).not_null())
                    .col(integer(ItemComment::UserId).not_null())
                    .col(text(ItemComment::Comment).not_null())
                    .col(timestamp_with_time_zone(ItemComment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_comments_item")
                            .from(ItemComment::Table, ItemComment::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_comments_user")
                            .from(ItemComment::Table, ItemComment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ItemComment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ItemComment { #[sea_orm(iden = "item_comments")] Table, Id, ItemId, UserId, Comment, CreatedAt }

#[derive(DeriveIden)]
enum Item { #[sea_orm(iden = "items")] Table, Id }

#[derive(DeriveIden)]
enum User { #[sea_orm(iden = "users")] Table, Id }
