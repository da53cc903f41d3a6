//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. They create a local copy of
//! the warehouse invoice tables for development and integration tests.

pub use sea_orm_migration::prelude::*;

mod m20261018_000001_invoices;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261018_000001_invoices::Migration)]
    }
}
