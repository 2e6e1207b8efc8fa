//! Create `orders` table. `status` is free-form text defaulting to `pending`.
//! Orders are never deleted, so both foreign keys restrict deletes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(pk_auto(Order::Id))
                    .col(integer(Order::ItemId).not_null())
                    .col(integer(Order::UserId).not_null())
                    .col(string_len(Order::Status, 64).not_null().default("pending"))
                    .col(timestamp_with_time_zone(Order::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Order::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_item")
                            .from(Order::Table, Order::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Order::Table, Order::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order { #[sea_orm(iden = "orders")] Table, Id, ItemId, UserId, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Item { #[sea_orm(iden = "items")] Table, Id }

#[derive(DeriveIden)]
enum User { #[sea_orm(iden = "users")] Table, Id }
