//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_role;
mod m20240301_000002_create_user;
mod m20240301_000003_create_item;
mod m20240301_000004_create_item_rating;
mod m20240301_000005_create_item_comment;
mod m20240301_000006_create_order;
mod m20240301_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_role::Migration),
            Box::new(m20240301_000002_create_user::Migration),
            Box::new(m20240301_000003_create_item::Migration),
            Box::new(m20240301_000004_create_item_rating::Migration),
            Box::new(m20240301_000005_create_item_comment::Migration),
            Box::new(m20240301_000006_create_order::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000007_add_indexes::Migration),
        ]
    }
}
