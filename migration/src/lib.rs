pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_portfolios_table;
mod m20251001_000002_create_services_table;
mod m20251001_000003_add_order_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_portfolios_table::Migration),
            Box::new(m20251001_000002_create_services_table::Migration),
            Box::new(m20251001_000003_add_order_indexes::Migration),
        ]
    }
}
