use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use super::OrderStore;
use crate::db::{portfolio as portfolio_db, services as service_db};
use crate::models::RecordKind;

/// Writes positions straight to the `portfolios` or `services` table.
pub struct SeaOrmOrderStore<'a> {
    db: &'a DatabaseConnection,
    kind: RecordKind,
}

impl<'a> SeaOrmOrderStore<'a> {
    pub fn new(db: &'a DatabaseConnection, kind: RecordKind) -> Self {
        Self { db, kind }
    }
}

#[async_trait]
impl OrderStore for SeaOrmOrderStore<'_> {
    async fn set_order_index(&self, id: Uuid, order_index: i32) -> Result<(), DbErr> {
        match self.kind {
            RecordKind::Portfolios => {
                portfolio_db::set_order_index(self.db, id, order_index).await
            }
            RecordKind::Services => service_db::set_order_index(self.db, id, order_index).await,
        }
    }
}
