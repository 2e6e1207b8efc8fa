#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory database; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, name: &str, email: &str, role: &str) -> anyhow::Result<models::user::Model> {
    let role = models::role::find_by_name(db, role)
        .await?
        .ok_or_else(|| anyhow::anyhow!("role {} not seeded", role))?;
    Ok(models::user::create(db, name, email, "$argon2id$v=19$test", role.id).await?)
}

pub async fn seed_item(db: &DatabaseConnection, seller_id: i32, name: &str, price: f64) -> anyhow::Result<models::item::Model> {
    Ok(models::item::create(db, seller_id, name, price).await?)
}
