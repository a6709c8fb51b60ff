use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Status,
    OrderIndex,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Status,
    OrderIndex,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Public pages read published rows in display order.
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_status_order_index")
                    .table(Portfolios::Table)
                    .col(Portfolios::Status)
                    .col(Portfolios::OrderIndex)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_status_order_index")
                    .table(Services::Table)
                    .col(Services::Status)
                    .col(Services::OrderIndex)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_portfolios_status_order_index")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_status_order_index").to_owned())
            .await?;

        Ok(())
    }
}
