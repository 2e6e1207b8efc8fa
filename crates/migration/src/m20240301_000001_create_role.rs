//! Create `roles` table and seed the built-in roles.
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Roles every deployment starts with; `customer` is the sign-up default.
const SEED_ROLES: [&str; 2] = ["customer", "seller"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Role::Table)
                    .if_not_exists()
                    .col(pk_auto(Role::Id))
                    .col(string_len(Role::Name, 64).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Role::Table).columns([Role::Name]);
        for name in SEED_ROLES {
            insert.values_panic([name.into()]);
        }
        let stmt = manager.get_database_backend().build(&insert);
        manager.get_connection().execute(stmt).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Role::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Role { #[sea_orm(iden = "roles")] Table, Id, Name }
