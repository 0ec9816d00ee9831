//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_lookup_tables;
mod m20240101_000003_create_catalog;
mod m20240101_000004_create_service_provider;
mod m20240101_000005_create_service_request;
mod m20240101_000006_create_service_response;
mod m20240101_000007_create_advertisement;
mod m20240101_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_lookup_tables::Migration),
            Box::new(m20240101_000003_create_catalog::Migration),
            Box::new(m20240101_000004_create_service_provider::Migration),
            Box::new(m20240101_000005_create_service_request::Migration),
            Box::new(m20240101_000006_create_service_response::Migration),
            Box::new(m20240101_000007_create_advertisement::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000008_add_indexes::Migration),
        ]
    }
}
