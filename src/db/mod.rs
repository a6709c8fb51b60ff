pub mod portfolio;
pub mod services;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a SeaORM database connection pool for `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
